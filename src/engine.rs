//! Run execution.
//!
//! `SortEngine` is the call boundary of the core: it takes an algorithm
//! selector and an owned input, builds a fresh recorder for the run, and
//! returns the sorted sequence with its metrics (and, for traced runs, the
//! frozen trace). Each call owns everything it touches, so independent calls
//! may run concurrently.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithms::Algorithm;
use crate::config::SortOptions;
use crate::element::Element;
use crate::error::SortLabResult;
use crate::metrics::Metrics;
use crate::recorder::{MetricsRecorder, TraceRecorder};
use crate::trace::Trace;

/// Flat result row consumed by benchmark reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Algorithm selector name.
    pub algorithm_name: String,
    /// Number of input elements.
    pub input_size: usize,
    /// Comparisons performed.
    pub comparisons: u64,
    /// Swaps and overwrites performed.
    pub swaps: u64,
    /// Time inside the algorithm.
    pub time_seconds: f64,
}

/// Outcome of an untraced run.
#[derive(Debug, Clone)]
pub struct SortRun<T> {
    /// Algorithm that produced the run.
    pub algorithm: Algorithm,
    /// Number of input elements.
    pub input_size: usize,
    /// The sorted sequence; authoritative over any caller copy.
    pub sorted: Vec<T>,
    /// Final metrics.
    pub metrics: Metrics,
}

impl<T> SortRun<T> {
    /// Flattens the run into a reporting row.
    #[must_use]
    pub fn record(&self) -> RunRecord {
        RunRecord {
            algorithm_name: self.algorithm.name().to_string(),
            input_size: self.input_size,
            comparisons: self.metrics.comparisons,
            swaps: self.metrics.swaps,
            time_seconds: self.metrics.time_seconds,
        }
    }
}

/// Outcome of a traced run.
#[derive(Debug, Clone)]
pub struct TracedRun<T> {
    /// Algorithm that produced the run.
    pub algorithm: Algorithm,
    /// The input as given, kept for replay.
    pub input: Vec<T>,
    /// The sorted sequence.
    pub sorted: Vec<T>,
    /// Final metrics. `time_seconds` includes snapshot overhead.
    pub metrics: Metrics,
    /// Frozen step log.
    pub trace: Trace<T>,
}

/// Executes algorithms with a fixed set of run options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortEngine {
    options: SortOptions,
}

impl SortEngine {
    /// Creates an engine applying `options` to every run.
    #[must_use]
    pub const fn new(options: SortOptions) -> Self {
        Self { options }
    }

    /// The options applied to every run.
    #[must_use]
    pub const fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Sorts `input` counting operations only.
    ///
    /// This is the benchmarking path: instrumentation costs two counter
    /// increments per operation.
    pub fn run<T: Element>(&self, algorithm: Algorithm, input: Vec<T>) -> SortLabResult<SortRun<T>> {
        let mut data = input;
        let mut rec = MetricsRecorder::new();
        algorithm.sort(&mut data, &mut rec, &self.options)?;
        let metrics = rec.finish();

        debug!(
            algorithm = algorithm.name(),
            n = data.len(),
            comparisons = metrics.comparisons,
            swaps = metrics.swaps,
            time_seconds = metrics.time_seconds,
            "sort run complete"
        );

        Ok(SortRun {
            algorithm,
            input_size: data.len(),
            sorted: data,
            metrics,
        })
    }

    /// Sorts a copy of `input`, recording a replayable trace.
    pub fn run_traced<T: Element>(
        &self,
        algorithm: Algorithm,
        input: &[T],
    ) -> SortLabResult<TracedRun<T>> {
        let mut data = input.to_vec();
        let mut rec = TraceRecorder::new(data.len());
        algorithm.sort(&mut data, &mut rec, &self.options)?;
        let (metrics, trace) = rec.finish();

        debug!(
            algorithm = algorithm.name(),
            n = data.len(),
            steps = trace.len(),
            comparisons = metrics.comparisons,
            swaps = metrics.swaps,
            "traced sort run complete"
        );

        Ok(TracedRun {
            algorithm,
            input: input.to_vec(),
            sorted: data,
            metrics,
            trace,
        })
    }
}
