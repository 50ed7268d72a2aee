//! Selection sort.
//!
//! For each position the unsorted suffix is scanned for its minimum, which is
//! then swapped into place. Under `SelfSwapPolicy::Count` the swap happens
//! even when the minimum is already in position. Not stable.

use std::cmp::Ordering;

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::ExecutionError;
use crate::recorder::Recorder;

use super::{swap_with_policy, SortAlgorithm};

/// Minimum-selection sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionSort;

impl SortAlgorithm for SelectionSort {
    const NAME: &'static str = "selection";

    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        let n = data.len();
        if n < 2 {
            return Ok(());
        }

        for i in 0..n - 1 {
            let mut min = i;
            for j in i + 1..n {
                rec.compare(min, j, data);
                if data[j].try_cmp(&data[min])? == Ordering::Less {
                    min = j;
                }
            }
            swap_with_policy(data, i, min, rec, options);
            rec.mark_sorted(i..i + 1, data);
        }
        rec.mark_sorted(n - 1..n, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelfSwapPolicy;
    use crate::recorder::MetricsRecorder;

    fn run(input: &[i32], options: &SortOptions) -> (Vec<i32>, crate::Metrics) {
        let mut data = input.to_vec();
        let mut rec = MetricsRecorder::new();
        SelectionSort::sort(&mut data, &mut rec, options).unwrap();
        (data, rec.finish())
    }

    #[test]
    fn test_comparisons_are_quadratic() {
        let (sorted, m) = run(&[5, 3, 1, 4, 2], &SortOptions::default());
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(m.comparisons, 10);
    }

    #[test]
    fn test_self_swaps_counted_by_default() {
        let (_, m) = run(&[1, 2, 3, 4, 5], &SortOptions::default());
        assert_eq!(m.swaps, 4);
    }

    #[test]
    fn test_self_swaps_skipped_when_configured() {
        let options = SortOptions {
            self_swaps: SelfSwapPolicy::Skip,
        };
        let (sorted, m) = run(&[1, 2, 3, 4, 5], &options);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(m.swaps, 0);

        let (sorted, m) = run(&[5, 3, 1, 4, 2], &options);
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        // [5,3,1,4,2] -> [1,3,5,4,2] -> [1,2,5,4,3] -> [1,2,3,4,5]; the last slot needs no swap.
        assert_eq!(m.swaps, 3);
    }
}
