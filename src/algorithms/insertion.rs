//! Insertion sort.
//!
//! The element at position `i` travels left one slot at a time while its
//! predecessor is greater. Each shift writes the two adjacent slots and is
//! recorded as one `Overwrite`; the last shift leaves the element in place,
//! so no separate placement write exists. Stable.

use std::cmp::Ordering;

use crate::config::SortOptions;
use crate::element::Element;
use crate::error::ExecutionError;
use crate::recorder::Recorder;

use super::SortAlgorithm;

/// Shift-based insertion sort.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    const NAME: &'static str = "insertion";

    fn sort<T: Element, R: Recorder<T>>(
        data: &mut [T],
        rec: &mut R,
        _options: &SortOptions,
    ) -> Result<(), ExecutionError> {
        let n = data.len();
        if n < 2 {
            return Ok(());
        }

        for i in 1..n {
            let mut j = i;
            while j > 0 {
                rec.compare(j - 1, j, data);
                if data[j - 1].try_cmp(&data[j])? != Ordering::Greater {
                    break;
                }
                data.swap(j - 1, j);
                rec.overwrite(&[j - 1, j], data);
                j -= 1;
            }
        }
        rec.mark_sorted(0..n, data);
        Ok(())
    }
}
