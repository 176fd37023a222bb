//! PocxVanity Core Engine
//!
//! Parallel, cancellable vanity search over freshly generated PoCX wallets.

mod cancel;
mod error;
mod search;
mod stats;

pub use cancel::CancellationToken;
pub use error::SearchError;
pub use search::{SearchConfig, SearchHandle, SearchResult, VanitySearch};
pub use stats::{Progress, SearchStats};

// Re-exports for convenience
pub use pocxvanity_crypto::{add_checksum, verify_checksum};
pub use pocxvanity_pattern::{
    calculate_difficulty, estimate_time_50pct, format_difficulty, format_duration, validate_pattern,
    SearchPattern,
};
pub use pocxvanity_wallet::{
    Candidate, GeneratedAddress, KeyDerivationProvider, Network, PocxProvider, ProviderError,
    WalletDescriptors,
};

/// Search with the default configuration, blocking until it terminates.
///
/// For a non-blocking search build a [`VanitySearch`] and call
/// [`VanitySearch::spawn`]; the returned [`SearchHandle`] cancels and joins it.
pub fn search<P, F>(
    provider: P,
    pattern: &str,
    network: Network,
    progress: F,
    cancel: &CancellationToken,
) -> Result<SearchResult, SearchError>
where
    P: KeyDerivationProvider,
    F: FnMut(Progress),
{
    VanitySearch::new(provider, pattern, network, SearchConfig::default())?.run(cancel, progress)
}

/// 8-character checksum of an output descriptor
pub fn compute_descriptor_checksum(descriptor: &str) -> String {
    pocxvanity_crypto::descriptor_checksum(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_descriptor_checksum() {
        assert_eq!(
            compute_descriptor_checksum("wpkh(KxTnSTY4wGYyPxNKDiLWYVQQvRRM8ggRSqPpaAQZJ6C5sUKvTUbN)"),
            "5p77mdgk"
        );
    }

    #[test]
    fn test_search_rejects_invalid_pattern() {
        let result = search(PocxProvider, "oops", Network::Main, |_| {}, &CancellationToken::new());
        assert!(matches!(result, Err(SearchError::InvalidPattern(_))));
    }

    #[test]
    fn test_search_honours_prior_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = search(PocxProvider, "qqqqqqqqqq", Network::Test, |_| {}, &cancel);
        assert_eq!(result.unwrap_err(), SearchError::Cancelled);
    }
}
