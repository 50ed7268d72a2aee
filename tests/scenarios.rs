//! End-to-end scenarios through the public API.

use sortlab::generator::{generate_seeded, shuffled_range, Distribution};
use sortlab::{
    Algorithm, Animation, BenchmarkConfig, ExecutionError, SelfSwapPolicy, SortEngine,
    SortLabError, SortOptions, StepKind, Trace, Value,
};

const SAMPLE: [i64; 5] = [5, 3, 1, 4, 2];

fn counts(alg: Algorithm, input: &[i64], self_swaps: SelfSwapPolicy) -> (u64, u64) {
    let run = SortEngine::new(SortOptions { self_swaps })
        .run(alg, input.to_vec())
        .unwrap();
    assert_eq!(run.sorted, vec![1, 2, 3, 4, 5]);
    (run.metrics.comparisons, run.metrics.swaps)
}

#[test]
fn five_element_reference_counts() {
    // Each adjacent swap removes one inversion; [5,3,1,4,2] has seven.
    assert_eq!(counts(Algorithm::Bubble, &SAMPLE, SelfSwapPolicy::Count), (10, 7));
    assert_eq!(counts(Algorithm::Insertion, &SAMPLE, SelfSwapPolicy::Count), (9, 7));
    assert_eq!(counts(Algorithm::Selection, &SAMPLE, SelfSwapPolicy::Count), (10, 4));
    assert_eq!(counts(Algorithm::Selection, &SAMPLE, SelfSwapPolicy::Skip), (10, 3));
    assert_eq!(counts(Algorithm::Merge, &SAMPLE, SelfSwapPolicy::Count), (7, 12));
}

#[test]
fn quick_sort_on_sorted_input_is_quadratic() {
    let sorted = [1, 2, 3, 4, 5];
    assert_eq!(counts(Algorithm::Quick, &sorted, SelfSwapPolicy::Count), (10, 14));
    assert_eq!(counts(Algorithm::Quick, &sorted, SelfSwapPolicy::Skip), (10, 0));
}

#[test]
fn empty_and_singleton_inputs_do_nothing() {
    let engine = SortEngine::default();
    for alg in Algorithm::ALL {
        for input in [vec![], vec![42_i64]] {
            let run = engine.run_traced(alg, &input).unwrap();
            assert_eq!(run.sorted, input, "{alg}");
            assert!(run.metrics.is_idle(), "{alg}");
            assert_eq!(run.trace.mutations(), 0, "{alg}");
            assert_eq!(run.trace.comparisons(), 0, "{alg}");
        }
    }
}

#[test]
fn two_element_boundary() {
    let engine = SortEngine::default();
    for alg in Algorithm::ALL {
        let run = engine.run(alg, vec![2, 1]).unwrap();
        assert_eq!(run.sorted, vec![1, 2], "{alg}");
        assert_eq!(run.metrics.comparisons, 1, "{alg}");
    }
}

#[test]
fn mixed_numbers_sort_and_text_fails() {
    let engine = SortEngine::default();
    let numbers = vec![Value::Float(2.5), Value::Int(-1), Value::Int(3), Value::Float(0.5)];
    for alg in Algorithm::ALL {
        let run = engine.run(alg, numbers.clone()).unwrap();
        assert_eq!(
            run.sorted,
            vec![Value::Int(-1), Value::Float(0.5), Value::Float(2.5), Value::Int(3)],
            "{alg}"
        );
    }

    let mixed = vec![Value::Int(1), Value::Text("apple".into())];
    for alg in Algorithm::ALL {
        let err = engine.run(alg, mixed.clone()).unwrap_err();
        assert!(err.is_type_mismatch(), "{alg}");
        assert!(err.is_execution());
        assert!(!err.is_retryable());
    }
}

#[test]
fn text_values_sort_lexicographically() {
    let words: Vec<Value> = ["pear", "apple", "fig"].into_iter().map(Value::from).collect();
    let run = SortEngine::default().run(Algorithm::Merge, words).unwrap();
    let sorted: Vec<&str> = run.sorted.iter().filter_map(Value::as_text).collect();
    assert_eq!(sorted, vec!["apple", "fig", "pear"]);
}

#[test]
fn algorithm_names_parse_and_reject() {
    assert_eq!("quick".parse::<Algorithm>().unwrap(), Algorithm::Quick);
    assert_eq!("Merge_Sort".parse::<Algorithm>().unwrap(), Algorithm::Merge);
    let err = "bogo".parse::<Algorithm>().unwrap_err();
    assert!(SortLabError::from(err).is_validation());
}

#[test]
fn tampered_trace_fails_replay() {
    let input = vec![3_i64, 1, 2];
    let run = SortEngine::default().run_traced(Algorithm::Bubble, &input).unwrap();
    assert_eq!(run.trace.replay(&input).unwrap(), vec![1, 2, 3]);

    let mut json: serde_json::Value = serde_json::to_value(&run.trace).unwrap();
    let swap_idx = run
        .trace
        .iter()
        .position(|s| s.kind == StepKind::Swap)
        .unwrap();
    // Corrupt a position the swap does not declare.
    json["steps"][swap_idx]["snapshot"][2] = serde_json::json!(99);
    let tampered: Trace<i64> = serde_json::from_value(json).unwrap();

    let err = tampered.replay(&input).unwrap_err();
    assert!(matches!(err, ExecutionError::ReplayDivergence { .. }));

    let short = tampered.replay(&input[..2]).unwrap_err();
    assert!(matches!(short, ExecutionError::ReplayLengthMismatch { expected: 3, actual: 2 }));
}

#[test]
fn digests_distinguish_algorithms() {
    let input = shuffled_range(12, 5);
    let engine = SortEngine::default();
    let bubble = engine.run_traced(Algorithm::Bubble, &input).unwrap();
    let again = engine.run_traced(Algorithm::Bubble, &input).unwrap();
    let quick = engine.run_traced(Algorithm::Quick, &input).unwrap();
    assert_eq!(bubble.trace.digest().unwrap(), again.trace.digest().unwrap());
    assert_ne!(bubble.trace.digest().unwrap(), quick.trace.digest().unwrap());
}

#[test]
fn animation_follows_trace() {
    let input = shuffled_range(10, 42);
    let run = SortEngine::default().run_traced(Algorithm::Selection, &input).unwrap();
    let animation = Animation::from_trace(Algorithm::Selection, &run.trace);
    assert_eq!(animation.len(), run.trace.len());
    assert_eq!(animation.file_name(), "sorting_animation_selection.json");
    let last = animation.frames.last().unwrap();
    assert_eq!(last.values, (1..=10).collect::<Vec<i64>>());
    assert_eq!(last.caption, format!("Step {0}/{0}", run.trace.len()));
}

#[test]
fn generated_distributions_sort_everywhere() {
    let engine = SortEngine::default();
    for dist in Distribution::ALL {
        let input = generate_seeded(dist, 64, 11);
        let mut expected = input.clone();
        expected.sort_unstable();
        for alg in Algorithm::ALL {
            let run = engine.run(alg, input.clone()).unwrap();
            assert_eq!(run.sorted, expected, "{alg} on {dist}");
        }
    }
}

#[test]
fn benchmark_config_from_toml() {
    let config = BenchmarkConfig::from_toml_str(
        r#"
        sizes = [10, 20]
        trials = 2
        seed = 9
        distributions = ["random", "nearly_sorted"]
        algorithms = ["merge", "quick"]
        workers = 2

        [options]
        self_swaps = "skip"
        "#,
    )
    .unwrap();
    assert_eq!(config.sizes, vec![10, 20]);
    assert_eq!(config.algorithms, vec![Algorithm::Merge, Algorithm::Quick]);
    assert_eq!(config.options.self_swaps, SelfSwapPolicy::Skip);

    let report = sortlab::run_benchmarks(&config).unwrap();
    assert_eq!(report.trials.len(), 2 * 2 * 2 * 2);
    assert_eq!(report.summary.len(), 2 * 2 * 2);
    assert!(report.summary.iter().all(|s| s.completed_trials == 2));
}

#[test]
fn worst_case_quick_sort_survives_bench_workers() {
    use sortlab::benchmark::{run_trials, BenchmarkInput};

    let n = 30_000_usize;
    let sorted: Vec<i64> = (0..n as i64).collect();
    let inputs: Vec<BenchmarkInput<i64>> = (0..2)
        .map(|trial| BenchmarkInput {
            distribution: Distribution::Sorted,
            trial,
            data: sorted.clone(),
        })
        .collect();

    let records = run_trials(&inputs, &[Algorithm::Quick], 2, SortOptions::default()).unwrap();
    assert_eq!(records.len(), 2);
    let expected = (n * (n - 1) / 2) as u64;
    for record in &records {
        let run = record.outcome.run().expect("trial completed");
        assert_eq!(run.algorithm_name, "quick");
        assert_eq!(run.input_size, n);
        assert_eq!(run.comparisons, expected);
    }
}
