//! Dynamically typed elements.
//!
//! Values read from user input are not known to share a type. Integers and
//! floats compare numerically with each other; text compares with text.
//! Any other pairing is a `TypeMismatch`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::element::{mismatch, Element};
use crate::error::ExecutionError;

/// A sortable value of runtime-determined type.
///
/// # Examples
///
/// ```
/// use sortlab::Value;
///
/// let int_val = Value::Int(3);
/// let float_val = Value::Float(2.5);
/// let text_val = Value::Text("pear".to_string());
///
/// assert!(int_val.is_numeric());
/// assert!(float_val.is_numeric());
/// assert!(!text_val.is_numeric());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer.
    Int(i64),
    /// Floating-point number; NaN compares with nothing.
    Float(f64),
    /// Arbitrary text, ordered lexicographically.
    Text(String),
}

impl Value {
    /// Parses an input token: integer first, then float, otherwise text.
    #[must_use]
    pub fn parse_token(token: &str) -> Self {
        if let Ok(v) = token.parse::<i64>() {
            return Self::Int(v);
        }
        if let Ok(v) = token.parse::<f64>() {
            return Self::Float(v);
        }
        Self::Text(token.to_string())
    }

    /// Returns true for `Int` and `Float`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Numeric value as a float; `None` for text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Text(_) => None,
        }
    }

    /// Borrowed text; `None` for numbers.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

/// 2^63 as a float; the first value above every `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Exact ordering of an integer against a float, with no rounding of `int`.
///
/// `None` only for NaN.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_LIMIT {
        return Some(Ordering::Less);
    }
    if float < -I64_LIMIT {
        return Some(Ordering::Greater);
    }
    // In range, so the truncation is exact.
    let whole = float.trunc();
    let ord = int.cmp(&(whole as i64));
    if ord != Ordering::Equal {
        return Some(ord);
    }
    whole.partial_cmp(&float)
}

impl Element for Value {
    fn try_cmp(&self, other: &Self) -> Result<Ordering, ExecutionError> {
        let ord = match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => cmp_int_float(*a, *b),
            (Self::Float(a), Self::Int(b)) => cmp_int_float(*b, *a).map(Ordering::reverse),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        };
        ord.ok_or_else(|| mismatch(self, other))
    }

    fn type_label(&self) -> &'static str {
        self.type_name()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Parses whitespace- or comma-separated tokens into values.
#[must_use]
pub fn parse_values(text: &str) -> Vec<Value> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(Value::parse_token)
        .collect()
}
