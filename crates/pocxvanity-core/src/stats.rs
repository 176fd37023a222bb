//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pocxvanity_pattern::{estimate_time_50pct, format_duration, probability};
use serde::{Deserialize, Serialize};

/// Thread-safe search statistics shared by all workers
#[derive(Debug)]
pub struct SearchStats {
    /// Candidates evaluated, never decreases
    attempts: AtomicU64,
    start_time: Instant,
    running: AtomicBool,
    /// An attempt or time limit stopped the search
    exhausted: AtomicBool,
}

impl SearchStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Count one evaluated candidate
    #[inline]
    pub fn add_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Lock-free snapshot of the attempt counter
    #[inline]
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn mark_exhausted(&self) {
        self.exhausted.store(true, Ordering::Relaxed);
        self.stop();
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Progress {
        Progress::new(self.total_attempts(), self.elapsed())
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            start_time: Instant::now(),
            running: AtomicBool::new(true),
            exhausted: AtomicBool::new(false),
        }
    }
}

/// Point-in-time view of search progress handed to the progress sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub attempts: u64,
    pub elapsed_secs: f64,
    pub keys_per_second: f64,
}

impl Progress {
    /// Snapshot for `attempts` evaluated over `elapsed`; the rate is derived from both
    pub fn new(attempts: u64, elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        Self {
            attempts,
            elapsed_secs,
            keys_per_second: if elapsed_secs > 0.0 {
                attempts as f64 / elapsed_secs
            } else {
                0.0
            },
        }
    }

    /// One-line status, e.g. `[812.40 key/s][Total 12.18K][Prob 1.2%][50% in 3.4h]`
    pub fn format(&self, difficulty: f64) -> String {
        let prob = probability(self.attempts, difficulty);

        let remaining_for_50 = if prob < 0.5 {
            let total = estimate_time_50pct(difficulty, self.keys_per_second);
            total - self.elapsed_secs
        } else {
            0.0
        };

        format!(
            "[{} key/s][Total {}][Prob {:.1}%][50% in {}]",
            format_rate(self.keys_per_second),
            format_keys(self.attempts),
            prob * 100.0,
            format_duration(remaining_for_50)
        )
    }
}

fn format_rate(rate: f64) -> String {
    if rate >= 1e6 {
        format!("{:.2}M", rate / 1e6)
    } else if rate >= 1e3 {
        format!("{:.2}K", rate / 1e3)
    } else {
        format!("{:.2}", rate)
    }
}

fn format_keys(keys: u64) -> String {
    if keys >= 1_000_000_000_000 {
        format!("{:.2}T", keys as f64 / 1e12)
    } else if keys >= 1_000_000_000 {
        format!("{:.2}G", keys as f64 / 1e9)
    } else if keys >= 1_000_000 {
        format!("{:.2}M", keys as f64 / 1e6)
    } else if keys >= 1000 {
        format!("{:.2}K", keys as f64 / 1e3)
    } else {
        format!("{}", keys)
    }
}
