//! Run and driver configuration.
//!
//! Nothing in sortlab reads process-wide state: seeds, sizes and counting
//! policies travel in these structs, so repeated or concurrent runs with the
//! same configuration are independent and reproducible.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::error::{OutputError, SortLabResult, ValidationError};
use crate::generator::Distribution;

/// How swaps of a position with itself are treated.
///
/// Selection sort and the Lomuto partition both reach swaps whose two
/// positions coincide. Counting them reproduces the textbook operation counts;
/// skipping them changes reported swap totals but never the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfSwapPolicy {
    /// Perform, count and trace self-swaps.
    #[default]
    Count,
    /// Skip self-swaps entirely.
    Skip,
}

impl SelfSwapPolicy {
    /// Returns true if self-swaps are performed and counted.
    #[must_use]
    pub const fn counts(self) -> bool {
        matches!(self, Self::Count)
    }
}

/// Options applied to a single sorting run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Self-swap counting policy.
    pub self_swaps: SelfSwapPolicy,
}

/// Benchmark driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkConfig {
    /// Input sizes to measure.
    pub sizes: Vec<usize>,
    /// Trials per (algorithm, distribution, size); results are averaged.
    pub trials: usize,
    /// Base seed for input generation.
    pub seed: u64,
    /// Input distributions to measure.
    pub distributions: Vec<Distribution>,
    /// Algorithms to measure.
    pub algorithms: Vec<Algorithm>,
    /// Worker threads running trials. 1 runs everything on the caller.
    pub workers: usize,
    /// Per-run options.
    pub options: SortOptions,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: vec![100, 200, 500, 1000, 2000],
            trials: 3,
            seed: 42,
            distributions: vec![Distribution::Random],
            algorithms: Algorithm::ALL.to_vec(),
            workers: 1,
            options: SortOptions::default(),
        }
    }
}

/// Upper bound on worker threads.
pub const MAX_WORKERS: usize = 64;

impl BenchmarkConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> SortLabResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| OutputError::ConfigParse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> SortLabResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| OutputError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Checks that the configuration describes at least one runnable trial.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sizes.is_empty() {
            return Err(ValidationError::EmptySizeList);
        }
        if self.trials == 0 {
            return Err(ValidationError::ZeroTrials);
        }
        if self.algorithms.is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "no algorithms selected".to_string(),
            });
        }
        if self.distributions.is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "no input distributions selected".to_string(),
            });
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ValidationError::InvalidConfig {
                reason: format!("workers must be in 1..={MAX_WORKERS}, got {}", self.workers),
            });
        }
        Ok(())
    }
}

/// Animation driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of elements in the generated input.
    pub n: usize,
    /// Seed for the shuffled input.
    pub seed: u64,
    /// Playback rate in frames per second.
    pub fps: u32,
    /// Per-run options.
    pub options: SortOptions,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            n: 30,
            seed: 42,
            fps: 20,
            options: SortOptions::default(),
        }
    }
}
