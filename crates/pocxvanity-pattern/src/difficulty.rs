//! Difficulty estimation for vanity patterns

use crate::matcher::BECH32_CHARSET;

/// Expected number of attempts to match a prefix of `pattern_len` symbols.
///
/// Every data-part symbol is uniformly distributed over the 32-symbol
/// charset and patterns are case-folded, so this is simply `32^len`.
pub fn calculate_difficulty(pattern_len: usize) -> f64 {
    (BECH32_CHARSET.len() as f64).powi(pattern_len as i32)
}

/// Probability of at least one match after `attempts` tries
pub fn probability(attempts: u64, difficulty: f64) -> f64 {
    if difficulty > 0.0 {
        1.0 - (-(attempts as f64) / difficulty).exp()
    } else {
        0.0
    }
}

/// Format difficulty as human-readable string
pub fn format_difficulty(difficulty: f64) -> String {
    if difficulty >= 1e15 {
        format!("{:.2}P", difficulty / 1e15)
    } else if difficulty >= 1e12 {
        format!("{:.2}T", difficulty / 1e12)
    } else if difficulty >= 1e9 {
        format!("{:.2}G", difficulty / 1e9)
    } else if difficulty >= 1e6 {
        format!("{:.2}M", difficulty / 1e6)
    } else if difficulty >= 1e3 {
        format!("{:.2}K", difficulty / 1e3)
    } else {
        format!("{:.0}", difficulty)
    }
}

/// Estimate seconds until 50% probability of finding a match
pub fn estimate_time_50pct(difficulty: f64, keys_per_second: f64) -> f64 {
    // ln(0.5) / ln(1 - 1/difficulty) ~ difficulty * ln(2)
    if keys_per_second <= 0.0 {
        return f64::INFINITY;
    }
    (difficulty * std::f64::consts::LN_2) / keys_per_second
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        "never".to_string()
    } else if seconds <= 0.0 {
        "now".to_string()
    } else if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}
