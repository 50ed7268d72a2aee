//! Benchmark driver.
//!
//! Inputs are generated once per (distribution, size, trial) from a single
//! seeded stream, so every algorithm sorts identical data. Each trial then
//! sorts its own copy with a metrics-only recorder. A failing trial is
//! recorded and excluded from averages; the other trials are unaffected.
//!
//! With `workers > 1` trials are pulled from a bounded job queue by scoped
//! worker threads. Results are reassembled in job order, so the report does
//! not depend on scheduling.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::thread;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, unbounded};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::algorithms::Algorithm;
use crate::config::{BenchmarkConfig, SortOptions};
use crate::element::Element;
use crate::engine::{RunRecord, SortEngine};
use crate::error::{ExecutionError, OutputError, SortLabError, SortLabResult};
use crate::generator::{self, Distribution};

/// CSV header written by `BenchmarkReport::to_csv`.
pub const CSV_HEADER: &str = "algorithm,distribution,n,time_seconds,comparisons,swaps";

/// One generated input shared by all algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkInput<T> {
    /// Shape the input was drawn from.
    pub distribution: Distribution,
    /// Trial number within its (distribution, size) group.
    pub trial: usize,
    /// The elements.
    pub data: Vec<T>,
}

/// Result of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrialOutcome {
    /// The run finished.
    Completed {
        /// The run's result row.
        run: RunRecord,
    },
    /// The run aborted.
    Failed {
        /// Rendered error.
        error: String,
    },
}

impl TrialOutcome {
    /// Result row of a completed trial.
    #[must_use]
    pub const fn run(&self) -> Option<&RunRecord> {
        match self {
            Self::Completed { run } => Some(run),
            Self::Failed { .. } => None,
        }
    }
}

/// One (algorithm, input) trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Algorithm under test.
    pub algorithm: Algorithm,
    /// Shape of the input.
    pub distribution: Distribution,
    /// Number of input elements.
    pub input_size: usize,
    /// Trial number within the group.
    pub trial: usize,
    /// Result row or failure.
    pub outcome: TrialOutcome,
}

/// Averages for one (algorithm, distribution, size) group.
///
/// Averages are `None` when no trial in the group completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    /// Algorithm under test.
    pub algorithm: Algorithm,
    /// Shape of the inputs.
    pub distribution: Distribution,
    /// Number of input elements.
    pub input_size: usize,
    /// Trials that finished.
    pub completed_trials: usize,
    /// Trials that aborted.
    pub failed_trials: usize,
    /// Mean time inside the algorithm.
    pub time_seconds: Option<f64>,
    /// Mean comparisons.
    pub comparisons: Option<f64>,
    /// Mean swaps and overwrites.
    pub swaps: Option<f64>,
}

/// Full benchmark output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Configuration the report was produced from.
    pub config: BenchmarkConfig,
    /// Every trial, grouped by algorithm.
    pub trials: Vec<TrialRecord>,
    /// Per-group averages.
    pub summary: Vec<BenchmarkSummary>,
}

impl BenchmarkReport {
    /// Summary row for a group, if measured.
    #[must_use]
    pub fn summary_for(
        &self,
        algorithm: Algorithm,
        distribution: Distribution,
        input_size: usize,
    ) -> Option<&BenchmarkSummary> {
        self.summary.iter().find(|s| {
            s.algorithm == algorithm && s.distribution == distribution && s.input_size == input_size
        })
    }

    /// Number of failed trials.
    #[must_use]
    pub fn failed_trials(&self) -> usize {
        self.trials
            .iter()
            .filter(|t| matches!(t.outcome, TrialOutcome::Failed { .. }))
            .count()
    }

    /// Renders the summary as CSV. Missing averages are empty cells.
    #[must_use]
    pub fn to_csv(&self) -> String {
        fn cell(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }

        let mut out = String::with_capacity(64 * (self.summary.len() + 1));
        out.push_str(CSV_HEADER);
        out.push('\n');
        for row in &self.summary {
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{},{},{}",
                row.algorithm,
                row.distribution,
                row.input_size,
                cell(row.time_seconds),
                cell(row.comparisons),
                cell(row.swaps),
            );
        }
        out
    }

    /// Renders the whole report as pretty JSON.
    pub fn to_json(&self) -> SortLabResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the CSV summary to `path`.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> SortLabResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_csv()).map_err(|e| OutputError::io(path, e))?;
        Ok(())
    }

    /// Writes the JSON report to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> SortLabResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| OutputError::io(path, e))?;
        Ok(())
    }
}

/// Generates the inputs for `config`, ordered by distribution, size, trial.
#[must_use]
pub fn generate_inputs(config: &BenchmarkConfig) -> Vec<BenchmarkInput<i64>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut inputs = Vec::with_capacity(config.distributions.len() * config.sizes.len() * config.trials);
    for &distribution in &config.distributions {
        for &n in &config.sizes {
            for trial in 0..config.trials {
                let data = generator::generate(distribution, n, &mut rng);
                inputs.push(BenchmarkInput { distribution, trial, data });
            }
        }
    }
    inputs
}

/// Runs the configured benchmark.
pub fn run_benchmarks(config: &BenchmarkConfig) -> SortLabResult<BenchmarkReport> {
    config.validate()?;

    let inputs = generate_inputs(config);
    info!(
        algorithms = config.algorithms.len(),
        inputs = inputs.len(),
        workers = config.workers,
        seed = config.seed,
        "starting benchmark"
    );

    let trials = run_trials(&inputs, &config.algorithms, config.workers, config.options)?;
    let summary = summarize(&trials);

    for row in &summary {
        info!(
            algorithm = row.algorithm.name(),
            distribution = row.distribution.name(),
            n = row.input_size,
            time_seconds = row.time_seconds,
            comparisons = row.comparisons,
            swaps = row.swaps,
            "benchmark group"
        );
    }

    Ok(BenchmarkReport {
        generated_at: Utc::now(),
        config: config.clone(),
        trials,
        summary,
    })
}

struct Job<'a, T> {
    algorithm: Algorithm,
    input: &'a BenchmarkInput<T>,
}

fn execute<T: Element>(job: &Job<'_, T>, engine: &SortEngine) -> TrialRecord {
    let input_size = job.input.data.len();
    let outcome = match engine.run(job.algorithm, job.input.data.clone()) {
        Ok(run) => TrialOutcome::Completed { run: run.record() },
        Err(err) => {
            warn!(
                algorithm = job.algorithm.name(),
                distribution = job.input.distribution.name(),
                n = input_size,
                trial = job.input.trial,
                error = %err,
                "benchmark trial failed"
            );
            TrialOutcome::Failed {
                error: err.to_string(),
            }
        }
    };
    TrialRecord {
        algorithm: job.algorithm,
        distribution: job.input.distribution,
        input_size,
        trial: job.input.trial,
        outcome,
    }
}

/// Runs every algorithm over every input.
///
/// Records are returned grouped by algorithm, then in input order.
pub fn run_trials<T: Element + Send + Sync>(
    inputs: &[BenchmarkInput<T>],
    algorithms: &[Algorithm],
    workers: usize,
    options: SortOptions,
) -> SortLabResult<Vec<TrialRecord>> {
    let jobs: Vec<Job<'_, T>> = algorithms
        .iter()
        .flat_map(|&algorithm| inputs.iter().map(move |input| Job { algorithm, input }))
        .collect();
    let engine = SortEngine::new(options);

    if workers <= 1 || jobs.len() <= 1 {
        return Ok(jobs.iter().map(|job| execute(job, &engine)).collect());
    }
    run_parallel(&jobs, workers, &engine)
}

fn run_parallel<T: Element + Send + Sync>(
    jobs: &[Job<'_, T>],
    workers: usize,
    engine: &SortEngine,
) -> SortLabResult<Vec<TrialRecord>> {
    let (job_tx, job_rx) = bounded::<usize>(jobs.len());
    let (result_tx, result_rx) = unbounded::<(usize, TrialRecord)>();

    for idx in 0..jobs.len() {
        job_tx.send(idx).map_err(|_| ExecutionError::WorkerFailed {
            message: "job queue closed".to_string(),
        })?;
    }
    drop(job_tx);

    thread::scope(|scope| -> SortLabResult<()> {
        for worker in 0..workers.min(jobs.len()) {
            let rx = job_rx.clone();
            let tx = result_tx.clone();
            thread::Builder::new()
                .name(format!("sortlab-bench-{worker}"))
                .spawn_scoped(scope, move || {
                    while let Ok(idx) = rx.recv() {
                        let record = execute(&jobs[idx], engine);
                        if tx.send((idx, record)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| ExecutionError::WorkerFailed {
                    message: e.to_string(),
                })?;
        }
        Ok(())
    })?;
    drop(result_tx);

    let mut slots: Vec<Option<TrialRecord>> = vec![None; jobs.len()];
    for (idx, record) in result_rx.try_iter() {
        slots[idx] = Some(record);
    }
    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.ok_or_else(|| {
                SortLabError::from(ExecutionError::WorkerFailed {
                    message: format!("job {idx} produced no result"),
                })
            })
        })
        .collect()
}

#[derive(Default)]
struct Accumulator {
    completed: usize,
    failed: usize,
    time: f64,
    comparisons: f64,
    swaps: f64,
}

/// Averages trial records per (algorithm, distribution, size).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(trials: &[TrialRecord]) -> Vec<BenchmarkSummary> {
    let mut groups: BTreeMap<(Algorithm, Distribution, usize), Accumulator> = BTreeMap::new();
    for t in trials {
        let acc = groups
            .entry((t.algorithm, t.distribution, t.input_size))
            .or_default();
        match &t.outcome {
            TrialOutcome::Completed { run } => {
                acc.completed += 1;
                acc.time += run.time_seconds;
                acc.comparisons += run.comparisons as f64;
                acc.swaps += run.swaps as f64;
            }
            TrialOutcome::Failed { .. } => acc.failed += 1,
        }
    }

    groups
        .into_iter()
        .map(|((algorithm, distribution, input_size), acc)| {
            let avg = |total: f64| (acc.completed > 0).then(|| total / acc.completed as f64);
            BenchmarkSummary {
                algorithm,
                distribution,
                input_size,
                completed_trials: acc.completed,
                failed_trials: acc.failed,
                time_seconds: avg(acc.time),
                comparisons: avg(acc.comparisons),
                swaps: avg(acc.swaps),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            sizes: vec![8, 16],
            trials: 2,
            seed: 7,
            distributions: vec![Distribution::Random, Distribution::Sorted],
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn test_inputs_are_reproducible() {
        let a = generate_inputs(&small_config());
        let b = generate_inputs(&small_config());
        assert_eq!(a, b);
        assert_eq!(a.len(), 2 * 2 * 2);
    }

    #[test]
    fn test_run_benchmarks_covers_every_group() {
        let report = run_benchmarks(&small_config()).unwrap();
        assert_eq!(report.trials.len(), 5 * 8);
        assert_eq!(report.summary.len(), 5 * 2 * 2);
        assert_eq!(report.failed_trials(), 0);

        let quick_sorted = report
            .summary_for(Algorithm::Quick, Distribution::Sorted, 8)
            .unwrap();
        assert_eq!(quick_sorted.completed_trials, 2);
        assert_eq!(quick_sorted.comparisons, Some(28.0));
    }

    #[test]
    fn test_parallel_matches_serial_counts() {
        let serial = run_benchmarks(&small_config()).unwrap();
        let parallel = run_benchmarks(&BenchmarkConfig {
            workers: 4,
            ..small_config()
        })
        .unwrap();
        assert_eq!(serial.trials.len(), parallel.trials.len());
        for (a, b) in serial.trials.iter().zip(&parallel.trials) {
            assert_eq!(a.algorithm, b.algorithm);
            assert_eq!(a.input_size, b.input_size);
            let (ma, mb) = (a.outcome.run().unwrap(), b.outcome.run().unwrap());
            assert_eq!(ma.algorithm_name, a.algorithm.name());
            assert_eq!(ma.input_size, a.input_size);
            assert_eq!(ma.comparisons, mb.comparisons);
            assert_eq!(ma.swaps, mb.swaps);
        }
    }

    #[test]
    fn test_failed_trial_is_isolated() {
        let inputs = vec![
            BenchmarkInput {
                distribution: Distribution::Random,
                trial: 0,
                data: vec![Value::Int(2), Value::Int(1), Value::Int(3)],
            },
            BenchmarkInput {
                distribution: Distribution::Random,
                trial: 1,
                data: vec![Value::Int(2), Value::Text("x".into()), Value::Int(3)],
            },
        ];
        let records = run_trials(&inputs, &[Algorithm::Insertion], 2, SortOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].outcome.run().is_some());
        assert!(matches!(records[1].outcome, TrialOutcome::Failed { ref error } if error.contains("Type mismatch")));

        let summary = summarize(&records);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].completed_trials, 1);
        assert_eq!(summary[0].failed_trials, 1);
        assert!(summary[0].comparisons.is_some());
    }

    #[test]
    fn test_all_failed_group_has_no_averages() {
        let records = vec![TrialRecord {
            algorithm: Algorithm::Merge,
            distribution: Distribution::Random,
            input_size: 3,
            trial: 0,
            outcome: TrialOutcome::Failed {
                error: "boom".to_string(),
            },
        }];
        let summary = summarize(&records);
        assert_eq!(summary[0].time_seconds, None);
        assert_eq!(summary[0].swaps, None);
    }

    #[test]
    fn test_csv_layout() {
        let report = run_benchmarks(&BenchmarkConfig {
            sizes: vec![4],
            trials: 1,
            algorithms: vec![Algorithm::Bubble],
            ..BenchmarkConfig::default()
        })
        .unwrap();
        let csv = report.to_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        let row = lines.next().unwrap();
        assert!(row.starts_with("bubble,random,4,"));
        assert_eq!(row.split(',').count(), 6);
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = run_benchmarks(&BenchmarkConfig {
            trials: 0,
            ..BenchmarkConfig::default()
        })
        .unwrap_err();
        assert!(err.is_validation());
    }
}
