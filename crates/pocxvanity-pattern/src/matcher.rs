//! Pattern validation and matching

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The 32 symbols of the Bech32 data part
pub const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern is empty")]
    EmptyPattern,
    #[error("Pattern contains invalid character '{0}' (valid: qpzry9x8gf2tvdw0s3jn54khce6mua7l)")]
    InvalidCharacter(char),
}

#[inline]
fn is_bech32_char(c: char) -> bool {
    BECH32_CHARSET.contains(c.to_ascii_lowercase())
}

fn strip_prefix_ignore_case<'a>(address: &'a str, prefix: &str) -> Option<&'a str> {
    let head = address.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        address.get(prefix.len()..)
    } else {
        None
    }
}

/// Check that every character, lower-cased, is in the Bech32 charset.
///
/// No length bound is applied and the empty string passes.
pub fn validate_pattern(pattern: &str) -> bool {
    pattern.chars().all(is_bech32_char)
}

/// A validated, lower-cased search pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchPattern {
    value: String,
}

impl SearchPattern {
    /// Validate and normalize a pattern; empty patterns are rejected
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        if let Some(c) = pattern.chars().find(|c| !is_bech32_char(*c)) {
            return Err(PatternError::InvalidCharacter(c));
        }

        Ok(Self {
            value: pattern.to_ascii_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True iff the pattern is a prefix of the address's data part, the
    /// portion after the constant `address_prefix` (e.g. `pocx1q`).
    ///
    /// An address that does not carry the expected prefix never matches.
    pub fn matches(&self, address: &str, address_prefix: &str) -> bool {
        let Some(data) = strip_prefix_ignore_case(address, address_prefix) else {
            return false;
        };

        data.len() >= self.value.len()
            && data.as_bytes()[..self.value.len()].eq_ignore_ascii_case(self.value.as_bytes())
    }
}

impl TryFrom<String> for SearchPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SearchPattern> for String {
    fn from(pattern: SearchPattern) -> Self {
        pattern.value
    }
}

impl std::fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "pocx1q";

    #[test]
    fn test_validate_accepts_charset() {
        assert!(validate_pattern(BECH32_CHARSET));
        assert!(validate_pattern(&BECH32_CHARSET.to_uppercase()));
        assert!(validate_pattern("MadF0x"));
        assert!(validate_pattern(""));
    }

    #[test]
    fn test_validate_rejects_excluded_symbols() {
        // '1', 'b', 'i' and 'o' are not part of the data charset
        for bad in ["1", "b", "i", "o", "B", "I", "O", "dead1", "x-y", " ", "é"] {
            assert!(!validate_pattern(bad), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_charset_invariant_exhaustive_ascii() {
        for byte in 0u8..128 {
            let c = byte as char;
            let expected = BECH32_CHARSET.contains(c.to_ascii_lowercase());
            assert_eq!(validate_pattern(&c.to_string()), expected, "char {:?}", c);
        }
    }

    #[test]
    fn test_search_pattern_normalizes_case() {
        let pattern = SearchPattern::new("DEAD").unwrap();
        assert_eq!(pattern.as_str(), "dead");
        assert_eq!(pattern.len(), 4);
    }

    #[test]
    fn test_search_pattern_errors() {
        assert_eq!(SearchPattern::new(""), Err(PatternError::EmptyPattern));
        assert_eq!(SearchPattern::new("abc"), Err(PatternError::InvalidCharacter('b')));
    }

    #[test]
    fn test_prefix_match_on_data_part() {
        let pattern = SearchPattern::new("madf0x").unwrap();

        assert!(pattern.matches("pocx1qmadf0xw4ly5e6rkv3mr0ppjyrxccdeqkpdsh", PREFIX));
        assert!(pattern.matches("POCX1QMADF0XW4LY5E6RKV3MR0PPJYRXCCDEQKPDSH", PREFIX));
        assert!(!pattern.matches("pocx1qw4lmadf0xy5e6rkv3mr0ppjyrxccdeqkpdsh", PREFIX));
    }

    #[test]
    fn test_fixed_prefix_is_not_matchable() {
        // "pocx" only ever appears in the constant prefix
        let pattern = SearchPattern::new("q").unwrap();
        assert!(!pattern.matches("pocx1qw4ly5e6rkv3mr0ppjyrxccdeqkpdsh", PREFIX));
        assert!(pattern.matches("pocx1qqw4ly5e6rkv3mr0ppjyrxccdeqkpdsh", PREFIX));
    }

    #[test]
    fn test_wrong_network_never_matches() {
        let pattern = SearchPattern::new("dead").unwrap();
        assert!(!pattern.matches("tpocx1qdeadw4ly5e6rkv3mr0ppjyrxccdeqkp", PREFIX));
        assert!(pattern.matches("tpocx1qdeadw4ly5e6rkv3mr0ppjyrxccdeqkp", "tpocx1q"));
    }

    #[test]
    fn test_short_or_malformed_addresses() {
        let pattern = SearchPattern::new("dead").unwrap();
        assert!(!pattern.matches("pocx1qde", PREFIX));
        assert!(!pattern.matches("poc", PREFIX));
        assert!(!pattern.matches("", PREFIX));
        assert!(!pattern.matches("pocx\u{e9}dead", PREFIX));
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let pattern: SearchPattern = serde_json::from_str("\"Dead\"").unwrap();
        assert_eq!(pattern.as_str(), "dead");
        assert!(serde_json::from_str::<SearchPattern>("\"bad\"").is_err());
    }
}
