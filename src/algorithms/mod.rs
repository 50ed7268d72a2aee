//! The five instrumented sorting algorithms.
//!
//! Every algorithm implements `SortAlgorithm`: it sorts a slice in place and
//! reports each comparison and write to a `Recorder`. `Algorithm` is the closed
//! set of implementations; it is resolved once at the call boundary and
//! dispatches statically, so no name lookup happens inside a sorting loop.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::{ExecutionError, ValidationError};
use crate::recorder::Recorder;

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

/// Shared contract of the instrumented algorithms.
///
/// Implementations must:
/// - return immediately, recording nothing, when `data.len() < 2`;
/// - call `Recorder::compare` once per comparison, before branching on it;
/// - call `Recorder::swap`/`Recorder::overwrite` once per relocation, after
///   applying it, naming exactly the positions that changed;
/// - propagate the first `TypeMismatch` without further writes.
pub trait SortAlgorithm {
    /// Selector name.
    const NAME: &'static str;

    /// Sorts `data` in place.
    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        options: &SortOptions,
    ) -> Result<(), ExecutionError>;
}

/// Swaps `i` and `j`, honoring the self-swap policy when they coincide.
pub(crate) fn swap_with_policy<T, R: Recorder<T>>(
    data: &mut [T],
    i: usize,
    j: usize,
    rec: &mut R,
    options: &SortOptions,
) {
    if i == j && !options.self_swaps.counts() {
        return;
    }
    data.swap(i, j);
    rec.swap(i, j, data);
}

/// Algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Adjacent-pair passes with early exit.
    Bubble,
    /// Shift-left insertion into the sorted prefix.
    Insertion,
    /// Minimum selection over the unsorted suffix.
    Selection,
    /// Top-down midpoint merge.
    Merge,
    /// Lomuto partition, last-element pivot.
    Quick,
}

impl Algorithm {
    /// All algorithms, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Bubble,
        Self::Insertion,
        Self::Selection,
        Self::Merge,
        Self::Quick,
    ];

    /// Selector name, as accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => BubbleSort::NAME,
            Self::Insertion => InsertionSort::NAME,
            Self::Selection => SelectionSort::NAME,
            Self::Merge => MergeSort::NAME,
            Self::Quick => QuickSort::NAME,
        }
    }

    /// Display title, e.g. "Bubble Sort".
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Insertion => "Insertion Sort",
            Self::Selection => "Selection Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Returns true if equal elements keep their relative order.
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(self, Self::Bubble | Self::Insertion | Self::Merge)
    }

    /// Sorts `data` in place, timing only the algorithm itself.
    ///
    /// The elapsed time is stored on the recorder even when the run fails.
    pub fn sort<T: Element, R: Recorder<T>>(
        self,
        data: &mut [T],
        rec: &mut R,
        options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        let start = Instant::now();
        let result = match self {
            Self::Bubble => BubbleSort::sort(data, rec, options),
            Self::Insertion => InsertionSort::sort(data, rec, options),
            Self::Selection => SelectionSort::sort(data, rec, options),
            Self::Merge => MergeSort::sort(data, rec, options),
            Self::Quick => QuickSort::sort(data, rec, options),
        };
        rec.record_elapsed(start.elapsed());
        result
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let stem = normalized
            .strip_suffix("_sort")
            .or_else(|| normalized.strip_suffix("sort"))
            .unwrap_or(&normalized);
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == stem)
            .ok_or_else(|| ValidationError::InvalidAlgorithmName { name: s.to_string() })
    }
}
