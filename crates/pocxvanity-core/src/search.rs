//! Vanity search engine

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pocxvanity_pattern::{calculate_difficulty, SearchPattern};
use pocxvanity_wallet::{Candidate, KeyDerivationProvider, Network};

use crate::cancel::CancellationToken;
use crate::error::SearchError;
use crate::stats::{Progress, SearchStats};

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of worker threads (0 = one per logical CPU)
    pub threads: usize,
    /// Maximum attempts (0 = unlimited)
    pub max_attempts: u64,
    /// Maximum time in seconds (0 = unlimited)
    pub max_time_secs: u64,
    /// Progress reporting cadence in milliseconds
    pub progress_interval_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_attempts: 0,
            max_time_secs: 0,
            progress_interval_ms: 250,
        }
    }
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// BIP-39 phrase of the winning wallet
    pub mnemonic: String,
    /// Its primary receiving address
    pub address: String,
    pub network: Network,
    /// Pattern that was matched (lower-case)
    pub pattern: String,
    /// Total candidates evaluated across all workers
    pub attempts: u64,
    pub elapsed_secs: f64,
    pub keys_per_second: f64,
}

/// Terminal event of a search; the first one claimed wins
enum Outcome {
    Found { candidate: Candidate, address: String },
    Failed(SearchError),
}

/// Vanity search engine
pub struct VanitySearch<P> {
    provider: Arc<P>,
    pattern: SearchPattern,
    network: Network,
    config: SearchConfig,
    difficulty: f64,
}

impl<P: KeyDerivationProvider> VanitySearch<P> {
    /// Create a new vanity search; the pattern is validated before anything runs
    pub fn new(
        provider: P,
        pattern: &str,
        network: Network,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        Self::with_shared_provider(Arc::new(provider), pattern, network, config)
    }

    /// Like [`VanitySearch::new`] for a provider the caller keeps a handle to
    pub fn with_shared_provider(
        provider: Arc<P>,
        pattern: &str,
        network: Network,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        let pattern = SearchPattern::new(pattern)?;
        let difficulty = calculate_difficulty(pattern.len());

        Ok(Self {
            provider,
            pattern,
            network,
            config,
            difficulty,
        })
    }

    /// Expected number of attempts
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn pattern(&self) -> &SearchPattern {
        &self.pattern
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Worker count after resolving `threads == 0`
    pub fn threads(&self) -> usize {
        if self.config.threads == 0 {
            num_cpus::get()
        } else {
            self.config.threads
        }
    }

    /// Run the search, blocking until a match, failure, limit or cancellation.
    ///
    /// `progress` is called on the calling thread every
    /// `progress_interval_ms` while the search is running; it never runs on
    /// a worker.
    pub fn run<F>(
        &self,
        cancel: &CancellationToken,
        mut progress: F,
    ) -> Result<SearchResult, SearchError>
    where
        F: FnMut(Progress),
    {
        let num_threads = self.threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("pocxvanity-worker-{}", i))
            .build()
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

        info!(
            pattern = %self.pattern,
            network = %self.network,
            threads = num_threads,
            difficulty = self.difficulty,
            "Starting vanity search"
        );

        let stats = SearchStats::new();
        let (outcome_tx, outcome_rx) = bounded::<Outcome>(1);
        let (done_tx, done_rx) = bounded::<()>(1);
        let interval = Duration::from_millis(self.config.progress_interval_ms.max(1));

        thread::scope(|scope| {
            let worker_stats = Arc::clone(&stats);
            scope.spawn(move || {
                pool.install(|| {
                    (0..num_threads).into_par_iter().for_each(|worker| {
                        self.worker_loop(worker, &worker_stats, cancel, &outcome_tx);
                    });
                });
                worker_stats.stop();
                let _ = done_tx.send(());
            });

            loop {
                match done_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if stats.is_running() && !cancel.is_cancelled() {
                            progress(stats.snapshot());
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        let summary = Progress::new(stats.total_attempts(), stats.elapsed());
        let attempts = summary.attempts;

        match outcome_rx.try_recv().ok() {
            Some(Outcome::Found { candidate, address }) => {
                info!(
                    address = %address,
                    attempts,
                    elapsed_secs = summary.elapsed_secs,
                    "Match found"
                );
                Ok(SearchResult {
                    mnemonic: candidate.mnemonic().to_string(),
                    address,
                    network: self.network,
                    pattern: self.pattern.to_string(),
                    attempts,
                    elapsed_secs: summary.elapsed_secs,
                    keys_per_second: summary.keys_per_second,
                })
            }
            Some(Outcome::Failed(err)) => {
                warn!(error = %err, attempts, "Search aborted");
                Err(err)
            }
            None if cancel.is_cancelled() => {
                info!(attempts, "Search cancelled");
                Err(SearchError::Cancelled)
            }
            None if stats.is_exhausted() => {
                info!(attempts, "Search limits reached without a match");
                Err(SearchError::LimitReached { attempts })
            }
            None => Err(SearchError::Cancelled),
        }
    }

    fn limit_reached(&self, stats: &SearchStats) -> bool {
        let max_attempts = self.config.max_attempts;
        let max_time = self.config.max_time_secs;

        (max_attempts > 0 && stats.total_attempts() >= max_attempts)
            || (max_time > 0 && stats.elapsed().as_secs() >= max_time)
    }

    fn evaluate_one(&self) -> Result<(Candidate, String), SearchError> {
        let candidate = self.provider.generate_seed()?;
        let address = self.provider.derive_address(&candidate, self.network)?;
        Ok((candidate, address))
    }

    fn worker_loop(
        &self,
        worker: usize,
        stats: &SearchStats,
        cancel: &CancellationToken,
        outcome: &Sender<Outcome>,
    ) {
        debug!(worker, "Worker started");
        let prefix = self.network.address_prefix();

        while stats.is_running() && !cancel.is_cancelled() {
            if self.limit_reached(stats) {
                stats.mark_exhausted();
                break;
            }

            let (candidate, address) = match self.evaluate_one() {
                Ok(evaluated) => evaluated,
                Err(err) => {
                    warn!(worker, error = %err, "Candidate evaluation failed");
                    let _ = outcome.try_send(Outcome::Failed(err));
                    stats.stop();
                    break;
                }
            };
            stats.add_attempt();

            if self.pattern.matches(&address, prefix) {
                // Single slot: only the first claim is accepted
                if outcome.try_send(Outcome::Found { candidate, address }).is_ok() {
                    debug!(worker, "Worker claimed the match");
                    stats.stop();
                }
                break;
            }
        }

        debug!(worker, "Worker stopped");
    }
}

impl<P: KeyDerivationProvider + 'static> VanitySearch<P> {
    /// Run the search on a background thread.
    ///
    /// The returned handle cancels through `cancel`, which the caller keeps.
    pub fn spawn<F>(
        self,
        cancel: CancellationToken,
        progress: F,
    ) -> Result<SearchHandle, SearchError>
    where
        F: FnMut(Progress) + Send + 'static,
    {
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("pocxvanity-search".to_string())
            .spawn(move || self.run(&token, progress))
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

        Ok(SearchHandle { cancel, handle })
    }
}

/// A search running in the background
pub struct SearchHandle {
    cancel: CancellationToken,
    handle: thread::JoinHandle<Result<SearchResult, SearchError>>,
}

impl SearchHandle {
    /// Request cooperative cancellation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the search to terminate; every worker has exited on return
    pub fn join(self) -> Result<SearchResult, SearchError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocxvanity_wallet::PocxProvider;

    #[test]
    fn test_search_easy_pattern() {
        let config = SearchConfig {
            threads: 2,
            max_attempts: 5000,
            ..Default::default()
        };

        // One symbol: 1 in 32 candidates matches
        let search = VanitySearch::new(PocxProvider, "q", Network::Main, config).unwrap();
        let result = search.run(&CancellationToken::new(), |_| {}).unwrap();

        assert!(result.address.starts_with("pocx1qq"));
        assert_eq!(result.mnemonic.split_whitespace().count(), 12);
        assert!(result.attempts >= 1);

        // The reported mnemonic really projects to the reported address
        let candidate = Candidate::from_phrase(&result.mnemonic).unwrap();
        let address = PocxProvider.derive_address(&candidate, Network::Main).unwrap();
        assert_eq!(address, result.address);
    }

    #[test]
    fn test_invalid_pattern_rejected_before_start() {
        let result = VanitySearch::new(PocxProvider, "b0b", Network::Main, SearchConfig::default());
        assert!(matches!(result, Err(SearchError::InvalidPattern(_))));
    }

    #[test]
    fn test_difficulty_and_threads() {
        let config = SearchConfig {
            threads: 3,
            ..Default::default()
        };

        let search = VanitySearch::new(PocxProvider, "AC", Network::Test, config).unwrap();
        assert_eq!(search.difficulty(), 1024.0);
        assert_eq!(search.threads(), 3);
        assert_eq!(search.pattern().as_str(), "ac");
        assert_eq!(search.network(), Network::Test);
    }

    #[test]
    fn test_result_serializes() {
        let result = SearchResult {
            mnemonic: "words".into(),
            address: "pocx1qdead".into(),
            network: Network::Main,
            pattern: "dead".into(),
            attempts: 10,
            elapsed_secs: 1.0,
            keys_per_second: 10.0,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"network\":\"main\""));
    }
}
