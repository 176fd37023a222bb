//! PocxVanity Pattern Engine
//!
//! Bech32 pattern validation, data-part prefix matching and difficulty estimates.

mod difficulty;
mod matcher;

pub use difficulty::{
    calculate_difficulty, estimate_time_50pct, format_difficulty, format_duration, probability,
};
pub use matcher::{validate_pattern, PatternError, SearchPattern, BECH32_CHARSET};
