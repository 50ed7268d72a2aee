//! Per-run operation counters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Operation counts and elapsed time for one sorting run.
///
/// A fresh value is created for every run and only the running algorithm
/// mutates it; once the run returns it is handed out by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Element-to-element ordering tests.
    pub comparisons: u64,
    /// Element relocations: swaps of two positions or single-slot overwrites.
    pub swaps: u64,
    /// Wall-clock time spent inside the algorithm.
    pub time_seconds: f64,
}

impl Metrics {
    /// Creates zeroed metrics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparisons: 0,
            swaps: 0,
            time_seconds: 0.0,
        }
    }

    /// Records the elapsed time of the run.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.time_seconds = elapsed.as_secs_f64();
    }

    /// Returns true if the run performed no comparisons and no writes.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.comparisons == 0 && self.swaps == 0
    }
}
