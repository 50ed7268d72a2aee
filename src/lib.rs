//! # sortlab - Instrumented Classical Sorting
//!
//! sortlab runs five classical comparison sorts (bubble, insertion,
//! selection, merge, quick) behind one contract. Every run reports how many
//! comparisons and writes it performed, and can optionally record a full
//! step-by-step trace that replays the run exactly.
//!
//! ## Core Concepts
//!
//! - **Algorithm**: a closed selector over the five sorts, parsed from names
//! - **Recorder**: the collector a run reports to; metrics-only or full trace
//! - **Trace**: the frozen, replayable step log of one run
//! - **SortEngine**: the call boundary that owns a run's recorder and input
//!
//! Around the core sit a benchmark driver (seeded inputs, worker pool,
//! CSV/JSON reports), an SVG performance chart, and animation frames built
//! from traces.
//!
//! ## Usage
//!
//! ```rust
//! use sortlab::{Algorithm, SortEngine, SortOptions};
//!
//! let engine = SortEngine::new(SortOptions::default());
//! let run = engine.run(Algorithm::Bubble, vec![5, 3, 1, 4, 2]).unwrap();
//! assert_eq!(run.sorted, vec![1, 2, 3, 4, 5]);
//! assert_eq!(run.metrics.comparisons, 10);
//!
//! let traced = engine.run_traced(Algorithm::Merge, &[3, 1, 2]).unwrap();
//! assert_eq!(traced.trace.replay(&[3, 1, 2]).unwrap(), vec![1, 2, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core
pub mod algorithms;
pub mod element;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod recorder;
pub mod trace;
pub mod value;

// Drivers and outputs
pub mod animation;
pub mod benchmark;
pub mod chart;
pub mod config;
pub mod generator;

// Re-export primary types at crate root for convenience
pub use algorithms::{Algorithm, SortAlgorithm};
pub use animation::{Animation, Frame};
pub use benchmark::{run_benchmarks, BenchmarkReport, BenchmarkSummary, TrialOutcome, TrialRecord};
pub use config::{AnimationConfig, BenchmarkConfig, SelfSwapPolicy, SortOptions};
pub use element::Element;
pub use engine::{RunRecord, SortEngine, SortRun, TracedRun};
pub use error::{ExecutionError, OutputError, SortLabError, SortLabResult, ValidationError};
pub use generator::Distribution;
pub use metrics::Metrics;
pub use recorder::{MetricsRecorder, Recorder, TraceRecorder};
pub use trace::{Step, StepKind, Trace};
pub use value::Value;
