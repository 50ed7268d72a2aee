//! The ordering contract for sortable elements.
//!
//! Sorting only needs a total order, but user-supplied data may mix types or
//! carry NaN floats. `Element::try_cmp` reports those pairs as a
//! `TypeMismatch` instead of silently picking an order.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ExecutionError;

/// A value that can be sorted by the instrumented algorithms.
pub trait Element: Clone + fmt::Debug {
    /// Compares two elements, failing when they are not mutually comparable.
    fn try_cmp(&self, other: &Self) -> Result<Ordering, ExecutionError>;

    /// Short type label used in error messages.
    fn type_label(&self) -> &'static str;
}

/// Builds the `TypeMismatch` error for a non-comparable pair.
pub(crate) fn mismatch<T: Element>(left: &T, right: &T) -> ExecutionError {
    ExecutionError::TypeMismatch {
        left: format!("{left:?}"),
        left_type: left.type_label(),
        right: format!("{right:?}"),
        right_type: right.type_label(),
    }
}

macro_rules! impl_total_element {
    ($($ty:ty => $label:literal),* $(,)?) => {
        $(
            impl Element for $ty {
                #[inline]
                fn try_cmp(&self, other: &Self) -> Result<Ordering, ExecutionError> {
                    Ok(self.cmp(other))
                }

                fn type_label(&self) -> &'static str {
                    $label
                }
            }
        )*
    };
}

impl_total_element!(
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    char => "char",
    bool => "bool",
    String => "string",
);

macro_rules! impl_float_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                #[inline]
                fn try_cmp(&self, other: &Self) -> Result<Ordering, ExecutionError> {
                    self.partial_cmp(other).ok_or_else(|| mismatch(self, other))
                }

                fn type_label(&self) -> &'static str {
                    stringify!($ty)
                }
            }
        )*
    };
}

impl_float_element!(f32, f64);
