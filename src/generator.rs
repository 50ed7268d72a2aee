//! Seeded input generation.
//!
//! All generators take an explicit RNG or seed; nothing draws from a global
//! source, so the same seed always yields the same inputs.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lower bound of uniformly random values.
pub const RANDOM_MIN: i64 = -10_000;
/// Upper bound (inclusive) of uniformly random values.
pub const RANDOM_MAX: i64 = 10_000;
/// Number of distinct values in a `FewUnique` input.
pub const FEW_UNIQUE_POOL: i64 = 8;

/// Shape of a generated input.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Uniform values in `RANDOM_MIN..=RANDOM_MAX`.
    #[default]
    Random,
    /// `1..=n` ascending.
    Sorted,
    /// `n..=1` descending.
    Reversed,
    /// Uniform values drawn from a pool of `FEW_UNIQUE_POOL` values.
    FewUnique,
    /// Ascending with `n / 10` random transpositions.
    NearlySorted,
}

impl Distribution {
    /// All distributions.
    pub const ALL: [Self; 5] = [
        Self::Random,
        Self::Sorted,
        Self::Reversed,
        Self::FewUnique,
        Self::NearlySorted,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sorted => "sorted",
            Self::Reversed => "reversed",
            Self::FewUnique => "few_unique",
            Self::NearlySorted => "nearly_sorted",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| ValidationError::InvalidDistribution { name: s.to_string() })
    }
}

fn ascending(n: usize) -> impl DoubleEndedIterator<Item = i64> {
    (1..=n).map(|v| i64::try_from(v).unwrap_or(i64::MAX))
}

/// Generates `n` values of the given shape from `rng`.
pub fn generate<R: Rng>(distribution: Distribution, n: usize, rng: &mut R) -> Vec<i64> {
    match distribution {
        Distribution::Random => (0..n).map(|_| rng.gen_range(RANDOM_MIN..=RANDOM_MAX)).collect(),
        Distribution::Sorted => ascending(n).collect(),
        Distribution::Reversed => ascending(n).rev().collect(),
        Distribution::FewUnique => (0..n).map(|_| rng.gen_range(0..FEW_UNIQUE_POOL)).collect(),
        Distribution::NearlySorted => {
            let mut data: Vec<i64> = ascending(n).collect();
            if n > 1 {
                for _ in 0..n / 10 {
                    let i = rng.gen_range(0..n);
                    let j = rng.gen_range(0..n);
                    data.swap(i, j);
                }
            }
            data
        }
    }
}

/// Generates `n` values of the given shape from a fresh RNG seeded with `seed`.
#[must_use]
pub fn generate_seeded(distribution: Distribution, n: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(distribution, n, &mut rng)
}

/// A seeded permutation of `1..=n`, the default animation input.
#[must_use]
pub fn shuffled_range(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data: Vec<i64> = ascending(n).collect();
    data.shuffle(&mut rng);
    data
}
