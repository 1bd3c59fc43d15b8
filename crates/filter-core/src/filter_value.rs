//! Table-filter values as produced by UI filter forms.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single filter value.
///
/// Forms produce strings, numbers, booleans, arrays of those (multi-select)
/// or nothing at all (`Null`, a cleared input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<FilterValue>),
}

/// Filter key -> value, in the order the form produced them.
pub type TableFilter = IndexMap<String, FilterValue>;

impl FilterValue {
    /// Convert from a JSON value. Objects are not filter values.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(FilterValue::Null),
            Value::Bool(b) => Some(FilterValue::Bool(b)),
            Value::Number(n) => Some(FilterValue::Number(n)),
            Value::String(s) => Some(FilterValue::String(s)),
            Value::Array(items) => items
                .into_iter()
                .map(FilterValue::from_json)
                .collect::<Option<Vec<_>>>()
                .map(FilterValue::Array),
            Value::Object(_) => None,
        }
    }

    /// The value as it should appear in an expression leaf.
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Null => Value::Null,
            FilterValue::Bool(b) => Value::Bool(*b),
            FilterValue::Number(n) => Value::Number(n.clone()),
            FilterValue::String(s) => Value::String(s.clone()),
            FilterValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    /// `Null`, `""` and `[]` carry no filtering intent.
    ///
    /// Numbers and booleans are never empty, `0` and `false` included.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::String(s) => s.is_empty(),
            FilterValue::Array(items) => items.is_empty(),
            FilterValue::Bool(_) | FilterValue::Number(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion for number-typed fields.
    ///
    /// - numbers pass through
    /// - strings are trimmed; blank means `0`, otherwise must parse as `f64`
    /// - booleans become `1` / `0`
    /// - `Null` and arrays have no numeric value
    pub fn to_number(&self) -> Option<Number> {
        match self {
            FilterValue::Number(n) => Some(n.clone()),
            FilterValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(Number::from(0));
                }
                trimmed.parse::<f64>().ok().and_then(json_number)
            }
            FilterValue::Bool(b) => Some(Number::from(u8::from(*b))),
            FilterValue::Null | FilterValue::Array(_) => None,
        }
    }
}

/// Integral floats become JSON integers (`10`, not `10.0`).
///
/// Non-finite values have no JSON representation.
fn json_number(v: f64) -> Option<Number> {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(Number::from(v as i64))
    } else {
        Number::from_f64(v)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<f64> for FilterValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or(FilterValue::Null, FilterValue::Number)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::Array(items.into_iter().map(Into::into).collect())
    }
}
