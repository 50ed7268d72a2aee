//! `sortlab` command-line tool.
//!
//! Runs a single instrumented sort, plays or exports an animation, or runs
//! the benchmark and writes its table, report and chart.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use sortlab::animation::{frame_interval, Animation};
use sortlab::chart::write_performance_svg;
use sortlab::config::{AnimationConfig, BenchmarkConfig, SelfSwapPolicy, SortOptions};
use sortlab::generator::shuffled_range;
use sortlab::value::parse_values;
use sortlab::{run_benchmarks, Algorithm, SortEngine, Value};

/// Instrumented classical sorting algorithms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sort one input and print the result with its metrics as JSON
    Run(RunArgs),
    /// Play a sort in the terminal, or save its frames as JSON
    Animate(AnimateArgs),
    /// Benchmark all algorithms and write table, report and chart
    Bench(BenchArgs),
}

/// Input selection shared by `run` and `animate`.
#[derive(Args, Debug)]
struct InputArgs {
    /// File of whitespace- or comma-separated values
    #[arg(long)]
    input: Option<PathBuf>,

    /// Size of the generated permutation when no input file is given
    #[arg(long)]
    n: Option<usize>,

    /// Seed for the generated permutation
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Algorithm: bubble, insertion, selection, merge or quick
    #[arg(long)]
    alg: Algorithm,

    #[command(flatten)]
    input: InputArgs,

    /// Do not record or count swaps whose two positions coincide
    #[arg(long, default_value_t = false)]
    skip_self_swaps: bool,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    /// Algorithm: bubble, insertion, selection, merge or quick
    #[arg(long)]
    alg: Algorithm,

    #[command(flatten)]
    input: InputArgs,

    /// Write the frames to a JSON file instead of playing them
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Directory for saved animations
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Playback speed in frames per second
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// TOML benchmark configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated input sizes
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Trials per (algorithm, distribution, size)
    #[arg(long)]
    trials: Option<usize>,

    /// Seed for input generation
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Directory for the table, report and chart
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Run(args) => run(&args),
        Command::Animate(args) => animate(&args),
        Command::Bench(args) => bench(args),
    }
}

fn load_input(args: &InputArgs, defaults: &AnimationConfig) -> Result<Vec<Value>> {
    if let Some(path) = &args.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        return Ok(parse_values(&text));
    }
    let n = args.n.unwrap_or(defaults.n);
    let seed = args.seed.unwrap_or(defaults.seed);
    Ok(shuffled_range(n, seed).into_iter().map(Value::Int).collect())
}

fn run(args: &RunArgs) -> Result<()> {
    let input = load_input(&args.input, &AnimationConfig::default())?;
    let options = SortOptions {
        self_swaps: if args.skip_self_swaps {
            SelfSwapPolicy::Skip
        } else {
            SelfSwapPolicy::Count
        },
    };

    let run = SortEngine::new(options)
        .run(args.alg, input)
        .with_context(|| format!("{} failed", args.alg.title()))?;

    let out = json!({
        "algorithm": args.alg,
        "stable": args.alg.is_stable(),
        "sorted": run.sorted,
        "metrics": run.metrics,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn animate(args: &AnimateArgs) -> Result<()> {
    let defaults = AnimationConfig::default();
    let input = load_input(&args.input, &defaults)?;

    let traced = SortEngine::new(defaults.options)
        .run_traced(args.alg, &input)
        .with_context(|| format!("{} failed", args.alg.title()))?;
    let animation = Animation::from_trace(args.alg, &traced.trace);
    info!(
        algorithm = args.alg.name(),
        frames = animation.len(),
        comparisons = traced.metrics.comparisons,
        swaps = traced.metrics.swaps,
        "trace recorded"
    );

    if args.save {
        let path = animation.save_json(&args.output_dir)?;
        info!(path = %path.display(), "animation saved");
        return Ok(());
    }

    let interval = frame_interval(args.fps.unwrap_or(defaults.fps));
    for frame in &animation.frames {
        print!("\x1b[2J\x1b[H{}", frame.render_text());
        thread::sleep(interval);
    }
    println!("{} {:?}", args.alg.title(), traced.metrics);
    Ok(())
}

fn bench(args: BenchArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BenchmarkConfig::load(path)?,
        None => BenchmarkConfig::default(),
    };
    if let Some(sizes) = args.sizes {
        config.sizes = sizes;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate()?;

    let report = run_benchmarks(&config)?;
    write_outputs(&report, &args.output_dir)?;

    println!(
        "{:<16}{:<14}{:>8}{:>16}{:>16}{:>16}",
        "algorithm", "distribution", "n", "time (s)", "comparisons", "swaps"
    );
    for row in &report.summary {
        let fmt = |v: Option<f64>, precision: usize| {
            v.map_or_else(|| "-".to_string(), |x| format!("{x:.precision$}"))
        };
        println!(
            "{:<16}{:<14}{:>8}{:>16}{:>16}{:>16}",
            row.algorithm.name(),
            row.distribution.name(),
            row.input_size,
            fmt(row.time_seconds, 6),
            fmt(row.comparisons, 1),
            fmt(row.swaps, 1),
        );
    }
    Ok(())
}

fn write_outputs(report: &sortlab::BenchmarkReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    report.write_csv(dir.join("benchmark_table.csv"))?;
    report.write_json(dir.join("benchmark_results.json"))?;
    write_performance_svg(report, dir.join("sorting_performance.svg"))?;
    info!(dir = %dir.display(), failed_trials = report.failed_trials(), "benchmark outputs written");
    Ok(())
}
