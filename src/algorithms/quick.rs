//! Quick sort with Lomuto partitioning.
//!
//! The pivot is always the last element of the range. Elements not greater
//! than the pivot are swapped into the low region, then the pivot is swapped
//! to the boundary and both sides are sorted in turn. Sorted and
//! reverse-sorted inputs hit the quadratic worst case. Not stable.

use std::cmp::Ordering;

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::ExecutionError;
use crate::recorder::Recorder;

use super::{swap_with_policy, SortAlgorithm};

/// Recursive quick sort, last-element pivot.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuickSort;

impl SortAlgorithm for QuickSort {
    const NAME: &'static str = "quick";

    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        if data.len() < 2 {
            return Ok(());
        }
        sort_range(data, 0, data.len(), rec, options)
    }
}

/// Sorts the half-open range `lo..hi`.
///
/// Pending ranges live on a heap stack, so sorted input (depth n) cannot
/// exhaust the thread stack. The right side is pushed first so the left side
/// is handled next, matching recursive order step for step.
fn sort_range<T: Element, R: Recorder<T>>(
    data: &mut [T],
    lo: usize,
    hi: usize,
    rec: &mut R,
    options: &SortOptions,
) -> Result<(), ExecutionError> {
    let mut pending = vec![(lo, hi)];
    while let Some((lo, hi)) = pending.pop() {
        match hi - lo {
            0 => continue,
            1 => {
                rec.mark_sorted(lo..hi, data);
                continue;
            }
            _ => {}
        }

        let p = partition(data, lo, hi, rec, options)?;
        rec.mark_sorted(p..p + 1, data);
        pending.push((p + 1, hi));
        pending.push((lo, p));
    }
    Ok(())
}

fn partition<T: Element, R: Recorder<T>>(
    data: &mut [T],
    lo: usize,
    hi: usize,
    rec: &mut R,
    options: &SortOptions,
) -> Result<usize, ExecutionError> {
    let pivot = hi - 1;
    let mut boundary = lo;
    for j in lo..pivot {
        rec.compare(j, pivot, data);
        if data[j].try_cmp(&data[pivot])? != Ordering::Greater {
            swap_with_policy(data, boundary, j, rec, options);
            boundary += 1;
        }
    }
    swap_with_policy(data, boundary, pivot, rec, options);
    Ok(boundary)
}
