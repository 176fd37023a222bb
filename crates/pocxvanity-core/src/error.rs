//! Search errors

use pocxvanity_pattern::PatternError;
use pocxvanity_wallet::ProviderError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),
    #[error("Entropy source failed: {0}")]
    EntropyFailure(String),
    #[error("Address derivation failed: {0}")]
    DerivationFailure(String),
    #[error("Search cancelled")]
    Cancelled,
    #[error("No match found within limits ({attempts} attempts)")]
    LimitReached { attempts: u64 },
    #[error("Failed to start search threads: {0}")]
    ThreadPool(String),
}

impl From<ProviderError> for SearchError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Entropy(msg) => SearchError::EntropyFailure(msg),
            ProviderError::Derivation(msg) | ProviderError::Mnemonic(msg) => {
                SearchError::DerivationFailure(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_mapping() {
        assert_eq!(
            SearchError::from(ProviderError::Entropy("os rng".into())),
            SearchError::EntropyFailure("os rng".into())
        );
        assert_eq!(
            SearchError::from(ProviderError::Mnemonic("checksum".into())),
            SearchError::DerivationFailure("checksum".into())
        );
    }

    #[test]
    fn test_pattern_error_conversion() {
        let err: SearchError = PatternError::InvalidCharacter('b').into();
        assert!(matches!(err, SearchError::InvalidPattern(_)));
        assert!(err.to_string().contains("'b'"));
    }
}
