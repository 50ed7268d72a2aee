//! Frozen execution traces.
//!
//! A `Trace` is the ordered log of steps emitted by one instrumented run.
//! It is produced by `TraceRecorder::finish` and exposes no way to append or
//! edit steps afterwards.

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::{ExecutionError, SortLabResult};

/// What happened at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Two positions were compared.
    Compare,
    /// Two positions were exchanged.
    Swap,
    /// Positions were written in place.
    Overwrite,
    /// Positions reached their final value.
    MarkSorted,
}

impl StepKind {
    /// Returns true for steps that change the sequence.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Swap | Self::Overwrite)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Overwrite => "overwrite",
            Self::MarkSorted => "mark_sorted",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trace entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<T> {
    /// Kind of operation.
    pub kind: StepKind,
    /// Positions involved, in the order the algorithm touched them.
    pub indices: Vec<usize>,
    /// The working sequence right after the step.
    pub snapshot: Vec<T>,
}

/// The ordered, read-only step log of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace<T> {
    input_len: usize,
    steps: Vec<Step<T>>,
}

impl<T> Trace<T> {
    pub(crate) const fn new(input_len: usize, steps: Vec<Step<T>>) -> Self {
        Self { input_len, steps }
    }

    /// Length of the sequence the trace was recorded over.
    #[must_use]
    pub const fn input_len(&self) -> usize {
        self.input_len
    }

    /// All steps in emission order.
    #[must_use]
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the run emitted no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    /// Number of steps of the given kind.
    #[must_use]
    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Number of `Compare` steps.
    #[must_use]
    pub fn comparisons(&self) -> usize {
        self.count(StepKind::Compare)
    }

    /// Number of `Swap` and `Overwrite` steps.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.steps.iter().filter(|s| s.kind.is_mutation()).count()
    }

    /// Snapshot after the last step, if any.
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&[T]> {
        self.steps.last().map(|s| s.snapshot.as_slice())
    }
}

impl<T: Clone + PartialEq> Trace<T> {
    /// Replays the trace against `input` and returns the reconstructed result.
    ///
    /// Mutation steps only apply the positions they declare; every step must
    /// leave the replayed state equal to its snapshot.
    pub fn replay(&self, input: &[T]) -> Result<Vec<T>, ExecutionError> {
        if input.len() != self.input_len {
            return Err(ExecutionError::ReplayLengthMismatch {
                expected: self.input_len,
                actual: input.len(),
            });
        }

        let mut state = input.to_vec();
        for (step_idx, step) in self.steps.iter().enumerate() {
            if step.snapshot.len() != state.len() {
                return Err(ExecutionError::ReplayDivergence { step: step_idx });
            }
            if let Some(&index) = step.indices.iter().find(|&&i| i >= state.len()) {
                return Err(ExecutionError::ReplayOutOfBounds {
                    step: step_idx,
                    index,
                    len: state.len(),
                });
            }
            if step.kind.is_mutation() {
                for &i in &step.indices {
                    state[i] = step.snapshot[i].clone();
                }
            }
            if state != step.snapshot {
                return Err(ExecutionError::ReplayDivergence { step: step_idx });
            }
        }
        Ok(state)
    }
}

impl<T: Serialize> Trace<T> {
    /// Stable fingerprint of the step sequence.
    ///
    /// Two runs of the same algorithm over the same input always produce the
    /// same digest.
    pub fn digest(&self) -> SortLabResult<String> {
        let mut h = Hasher::new();
        h.update(&(self.input_len as u64).to_le_bytes());
        for step in &self.steps {
            let bytes = serde_json::to_vec(step)?;
            h.update(&(bytes.len() as u64).to_le_bytes());
            h.update(&bytes);
        }
        Ok(h.finalize().to_hex().to_string())
    }
}

impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Step<T>;
    type IntoIter = std::slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
