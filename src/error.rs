//! Error types for sortlab.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the specific failure. Sorting is deterministic: an input that fails once
//! fails identically on every attempt, so nothing here is retryable.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating user input and configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Algorithm selector not in the known set.
    #[error("Unknown algorithm '{name}' (expected one of: bubble, insertion, selection, merge, quick)")]
    InvalidAlgorithmName {
        /// The name as given.
        name: String,
    },

    /// Distribution name not in the known set.
    #[error("Unknown input distribution '{name}' (expected one of: random, sorted, reversed, few_unique, nearly_sorted)")]
    InvalidDistribution {
        /// The name as given.
        name: String,
    },

    /// No benchmark sizes.
    #[error("Benchmark needs at least one input size")]
    EmptySizeList,

    /// Zero trials per size.
    #[error("Benchmark needs at least one trial per size")]
    ZeroTrials,

    /// Any other rejected configuration value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

/// Errors raised while a sort run or a trace replay executes.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Two elements have no defined order.
    #[error("Type mismatch: cannot compare {left} ({left_type}) with {right} ({right_type})")]
    TypeMismatch {
        /// Debug rendering of the left element.
        left: String,
        /// Type label of the left element.
        left_type: &'static str,
        /// Debug rendering of the right element.
        right: String,
        /// Type label of the right element.
        right_type: &'static str,
    },

    /// Replay input length differs from the recorded one.
    #[error("Replay input has {actual} elements, trace was recorded over {expected}")]
    ReplayLengthMismatch {
        /// Recorded length.
        expected: usize,
        /// Given length.
        actual: usize,
    },

    /// A step names a position past the end.
    #[error("Replay step {step} references index {index} outside a sequence of length {len}")]
    ReplayOutOfBounds {
        /// Step number.
        step: usize,
        /// Offending position.
        index: usize,
        /// Sequence length.
        len: usize,
    },

    /// Replayed state differs from a step's snapshot.
    #[error("Replay diverged at step {step}: state does not match the recorded snapshot")]
    ReplayDivergence {
        /// Step number.
        step: usize,
    },

    /// A benchmark worker could not start or lost a result.
    #[error("Benchmark worker failed: {message}")]
    WorkerFailed {
        /// Failure detail.
        message: String,
    },
}

/// Errors raised while reading inputs or persisting artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding failed.
    #[error("Serialization failed: {message}")]
    Serialization {
        /// Encoder message.
        message: String,
    },

    /// A TOML configuration did not parse.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Parser message.
        message: String,
    },
}

impl OutputError {
    /// Wraps an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for OutputError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Top-level error type for sortlab.
#[derive(Debug, Error)]
pub enum SortLabError {
    /// Rejected input or configuration.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A run or replay failed.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Reading inputs or writing artifacts failed.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl SortLabError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is an output error.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }

    /// Returns true if the run failed on a non-comparable element pair.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Execution(ExecutionError::TypeMismatch { .. }))
    }

    /// Returns true if this error is retryable.
    ///
    /// Sorting is a pure function of its input, so no error is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for SortLabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.into())
    }
}

/// Result type alias for sortlab operations.
pub type SortLabResult<T> = Result<T, SortLabError>;
