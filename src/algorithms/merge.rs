//! Top-down merge sort.
//!
//! Ranges are split at the midpoint until they hold at most one element.
//! A merge compares the heads of the two sorted runs on the untouched working
//! sequence and collects the output in a scratch buffer; the buffer is then
//! written back into the range, one `Overwrite` per output element. Writes are
//! counted once each, at write-back. Stable: ties take the left run.

use std::cmp::Ordering;

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::ExecutionError;
use crate::recorder::Recorder;

use super::SortAlgorithm;

/// Recursive merge sort with a shared scratch buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeSort;

impl SortAlgorithm for MergeSort {
    const NAME: &'static str = "merge";

    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        _options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        let n = data.len();
        if n < 2 {
            return Ok(());
        }

        let mut scratch = Vec::with_capacity(n);
        sort_range(data, 0, n, &mut scratch, rec)?;
        rec.mark_sorted(0..n, data);
        Ok(())
    }
}

fn sort_range<T: Element, R: Recorder<T>>(
    data: &mut [T],
    lo: usize,
    hi: usize,
    scratch: &mut Vec<T>,
    rec: &mut R,
) -> Result<(), ExecutionError> {
    if hi - lo <= 1 {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    sort_range(data, lo, mid, scratch, rec)?;
    sort_range(data, mid, hi, scratch, rec)?;
    merge(data, lo, mid, hi, scratch, rec)
}

fn merge<T: Element, R: Recorder<T>>(
    data: &mut [T],
    lo: usize,
    mid: usize,
    hi: usize,
    scratch: &mut Vec<T>,
    rec: &mut R,
) -> Result<(), ExecutionError> {
    scratch.clear();

    let (mut i, mut j) = (lo, mid);
    while i < mid && j < hi {
        rec.compare(i, j, data);
        if data[i].try_cmp(&data[j])? == Ordering::Greater {
            scratch.push(data[j].clone());
            j += 1;
        } else {
            scratch.push(data[i].clone());
            i += 1;
        }
    }
    // One run is exhausted; the rest of the other is already in order.
    scratch.extend_from_slice(&data[i..mid]);
    scratch.extend_from_slice(&data[j..hi]);

    for (offset, value) in scratch.drain(..).enumerate() {
        let k = lo + offset;
        data[k] = value;
        rec.overwrite(&[k], data);
    }
    Ok(())
}
