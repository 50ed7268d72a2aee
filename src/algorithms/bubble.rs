//! Bubble sort with early exit.
//!
//! Each pass walks adjacent pairs and swaps inversions, carrying the largest
//! remaining element to the end of the unsorted prefix. A pass without swaps
//! proves the prefix sorted and ends the run. Stable.

use std::cmp::Ordering;

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::ExecutionError;
use crate::recorder::Recorder;

use super::SortAlgorithm;

/// Adjacent-exchange sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct BubbleSort;

impl SortAlgorithm for BubbleSort {
    const NAME: &'static str = "bubble";

    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        _options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        let n = data.len();
        if n < 2 {
            return Ok(());
        }

        for pass in 0..n - 1 {
            let end = n - 1 - pass;
            let mut swapped = false;
            for j in 0..end {
                rec.compare(j, j + 1, data);
                if data[j].try_cmp(&data[j + 1])? == Ordering::Greater {
                    data.swap(j, j + 1);
                    rec.swap(j, j + 1, data);
                    swapped = true;
                }
            }
            if !swapped {
                rec.mark_sorted(0..end + 1, data);
                return Ok(());
            }
            rec.mark_sorted(end..end + 1, data);
        }
        rec.mark_sorted(0..1, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{MetricsRecorder, TraceRecorder};
    use crate::trace::StepKind;

    fn run(input: &[i32]) -> (Vec<i32>, crate::Metrics) {
        let mut data = input.to_vec();
        let mut rec = MetricsRecorder::new();
        BubbleSort::sort(&mut data, &mut rec, &SortOptions::default()).unwrap();
        (data, rec.finish())
    }

    #[test]
    fn test_five_element_scenario() {
        let (sorted, m) = run(&[5, 3, 1, 4, 2]);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(m.comparisons, 10);
        // One adjacent swap per inversion.
        assert_eq!(m.swaps, 7);
    }

    #[test]
    fn test_sorted_input_exits_after_one_pass() {
        let (sorted, m) = run(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.comparisons, 5);
        assert_eq!(m.swaps, 0);
    }

    #[test]
    fn test_reverse_input_runs_all_passes() {
        let (sorted, m) = run(&[4, 3, 2, 1]);
        assert_eq!(sorted, vec![1, 2, 3, 4]);
        assert_eq!(m.comparisons, 6);
        assert_eq!(m.swaps, 6);
    }

    #[test]
    fn test_every_position_is_marked_sorted() {
        let mut data = vec![3, 1, 2];
        let mut rec = TraceRecorder::new(data.len());
        BubbleSort::sort(&mut data, &mut rec, &SortOptions::default()).unwrap();
        let (_, trace) = rec.finish();
        let mut marked: Vec<usize> = trace
            .iter()
            .filter(|s| s.kind == StepKind::MarkSorted)
            .flat_map(|s| s.indices.iter().copied())
            .collect();
        marked.sort_unstable();
        assert_eq!(marked, vec![0, 1, 2]);
    }
}
