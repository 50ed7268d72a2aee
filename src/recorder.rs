//! Recorders observe a sorting run.
//!
//! Algorithms report every comparison and every write through a `Recorder`.
//! `MetricsRecorder` only counts, so benchmark timings carry a constant
//! per-operation cost. `TraceRecorder` additionally snapshots the working
//! sequence at each step for replay and animation.
//!
//! Counters are bumped in the same call that appends the step, so the number
//! of `Compare` steps always equals `comparisons` and the number of
//! `Swap`/`Overwrite` steps always equals `swaps`.

use std::ops::Range;
use std::time::Duration;

use crate::metrics::Metrics;
use crate::trace::{Step, StepKind, Trace};

/// Observer fed by the instrumented algorithms.
///
/// `compare` is called before the algorithm branches on the comparison.
/// `swap` and `overwrite` are called after the write has been applied, with
/// the positions that changed and the post-write sequence.
pub trait Recorder<T> {
    /// A comparison between positions `i` and `j`.
    fn compare(&mut self, i: usize, j: usize, data: &[T]);

    /// An exchange of positions `i` and `j`.
    fn swap(&mut self, i: usize, j: usize, data: &[T]);

    /// A write to the given positions that counts as a single relocation.
    fn overwrite(&mut self, indices: &[usize], data: &[T]);

    /// Positions that hold their final value. Not counted.
    fn mark_sorted(&mut self, range: Range<usize>, data: &[T]);

    /// Stores the time spent in the algorithm.
    fn record_elapsed(&mut self, elapsed: Duration);

    /// Current counters.
    fn metrics(&self) -> Metrics;
}

/// Counts operations without keeping a trace.
#[derive(Debug, Default, Clone)]
pub struct MetricsRecorder {
    metrics: Metrics,
}

impl MetricsRecorder {
    /// Creates a recorder with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metrics: Metrics::new(),
        }
    }

    /// Consumes the recorder, returning the final metrics.
    #[must_use]
    pub const fn finish(self) -> Metrics {
        self.metrics
    }
}

impl<T> Recorder<T> for MetricsRecorder {
    #[inline]
    fn compare(&mut self, _i: usize, _j: usize, _data: &[T]) {
        self.metrics.comparisons += 1;
    }

    #[inline]
    fn swap(&mut self, _i: usize, _j: usize, _data: &[T]) {
        self.metrics.swaps += 1;
    }

    #[inline]
    fn overwrite(&mut self, _indices: &[usize], _data: &[T]) {
        self.metrics.swaps += 1;
    }

    #[inline]
    fn mark_sorted(&mut self, _range: Range<usize>, _data: &[T]) {}

    fn record_elapsed(&mut self, elapsed: Duration) {
        self.metrics.set_elapsed(elapsed);
    }

    fn metrics(&self) -> Metrics {
        self.metrics
    }
}

/// Counts operations and captures a snapshot per step.
///
/// Each step clones the whole working sequence, so memory grows as
/// O(n * steps). Intended for teaching-sized inputs (tens to a few hundred
/// elements), not for large benchmarks.
#[derive(Debug, Clone)]
pub struct TraceRecorder<T> {
    metrics: Metrics,
    input_len: usize,
    steps: Vec<Step<T>>,
}

impl<T: Clone> TraceRecorder<T> {
    /// Creates an empty recorder for a run over `input_len` elements.
    #[must_use]
    pub const fn new(input_len: usize) -> Self {
        Self {
            metrics: Metrics::new(),
            input_len,
            steps: Vec::new(),
        }
    }

    fn push(&mut self, kind: StepKind, indices: Vec<usize>, data: &[T]) {
        self.steps.push(Step {
            kind,
            indices,
            snapshot: data.to_vec(),
        });
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Freezes the trace, returning it with the final metrics.
    #[must_use]
    pub fn finish(self) -> (Metrics, Trace<T>) {
        (self.metrics, Trace::new(self.input_len, self.steps))
    }
}

impl<T: Clone> Recorder<T> for TraceRecorder<T> {
    fn compare(&mut self, i: usize, j: usize, data: &[T]) {
        self.metrics.comparisons += 1;
        self.push(StepKind::Compare, vec![i, j], data);
    }

    fn swap(&mut self, i: usize, j: usize, data: &[T]) {
        self.metrics.swaps += 1;
        let indices = if i == j { vec![i] } else { vec![i, j] };
        self.push(StepKind::Swap, indices, data);
    }

    fn overwrite(&mut self, indices: &[usize], data: &[T]) {
        self.metrics.swaps += 1;
        self.push(StepKind::Overwrite, indices.to_vec(), data);
    }

    fn mark_sorted(&mut self, range: Range<usize>, data: &[T]) {
        if range.is_empty() {
            return;
        }
        self.push(StepKind::MarkSorted, range.collect(), data);
    }

    fn record_elapsed(&mut self, elapsed: Duration) {
        self.metrics.set_elapsed(elapsed);
    }

    fn metrics(&self) -> Metrics {
        self.metrics
    }
}
