//! Per-engine pass counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters updated at the end of every pass.
#[derive(Debug, Default)]
pub struct PassStats {
    runs: AtomicU64,
    skips: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`PassStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStatsSnapshot {
    /// Passes that did work and advanced the watermark.
    pub runs: u64,
    /// Passes that found too few pending turns.
    pub skips: u64,
    /// Passes that returned an error.
    pub failures: u64,
}

impl PassStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run(&self) {
        self.runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PassStatsSnapshot {
        PassStatsSnapshot {
            runs: self.runs.load(Ordering::Relaxed),
            skips: self.skips.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}
