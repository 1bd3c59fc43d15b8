//! Filter expression trees.
//!
//! These are **transport-agnostic** logical values. Serialized, each node is
//! a single-key JSON object, which is exactly what the query service takes
//! as its `where` argument:
//!
//! ```text
//! And(..)                  -> {"and": [..]}
//! Or(..)                   -> {"or": [..]}
//! Field { name, inner }    -> {"<name>": <inner>}
//! Condition { op, value }  -> {"<op>": <value>}
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::operator_set::Comparison;

/// One node of a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// All sub-expressions must hold.
    And(Vec<FilterExpression>),

    /// At least one sub-expression must hold.
    Or(Vec<FilterExpression>),

    /// Descend into a field (object fields nest, leaf fields hold a condition).
    Field {
        name: String,
        inner: Box<FilterExpression>,
    },

    /// Operator applied to the enclosing field.
    Condition { operator: Comparison, value: Value },
}

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl FilterExpression {
    pub fn and(items: Vec<FilterExpression>) -> Self {
        FilterExpression::And(items)
    }

    pub fn or(items: Vec<FilterExpression>) -> Self {
        FilterExpression::Or(items)
    }

    pub fn field(name: impl Into<String>, inner: FilterExpression) -> Self {
        FilterExpression::Field {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    pub fn condition(operator: Comparison, value: impl Into<Value>) -> Self {
        FilterExpression::Condition {
            operator,
            value: value.into(),
        }
    }

    /// `{"<name>": {"<op>": value}}`
    pub fn leaf(name: impl Into<String>, operator: Comparison, value: impl Into<Value>) -> Self {
        FilterExpression::field(name, FilterExpression::condition(operator, value))
    }

    /// Wrap `inner` in one `Field` per segment, outermost segment first.
    ///
    /// `nest(["instrument", "ticker"], c)` gives `{"instrument": {"ticker": c}}`.
    pub fn nest<S: AsRef<str>>(path: &[S], inner: FilterExpression) -> Self {
        path.iter()
            .rev()
            .fold(inner, |acc, segment| FilterExpression::field(segment.as_ref(), acc))
    }

    /// Sub-expressions of a combinator; empty for other nodes.
    pub fn children(&self) -> &[FilterExpression] {
        match self {
            FilterExpression::And(items) | FilterExpression::Or(items) => items,
            FilterExpression::Field { .. } | FilterExpression::Condition { .. } => &[],
        }
    }

    /// Build the equivalent JSON value.
    pub fn to_json(&self) -> Value {
        let (key, value) = match self {
            FilterExpression::And(items) => {
                ("and".to_string(), Value::Array(items.iter().map(Self::to_json).collect()))
            }
            FilterExpression::Or(items) => {
                ("or".to_string(), Value::Array(items.iter().map(Self::to_json).collect()))
            }
            FilterExpression::Field { name, inner } => (name.clone(), inner.to_json()),
            FilterExpression::Condition { operator, value } => {
                (operator.as_str().to_string(), value.clone())
            }
        };

        let mut map = Map::new();
        map.insert(key, value);
        Value::Object(map)
    }
}

impl Serialize for FilterExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            FilterExpression::And(items) => map.serialize_entry("and", items)?,
            FilterExpression::Or(items) => map.serialize_entry("or", items)?,
            FilterExpression::Field { name, inner } => map.serialize_entry(name, inner)?,
            FilterExpression::Condition { operator, value } => {
                map.serialize_entry(operator.as_str(), value)?
            }
        }
        map.end()
    }
}
