//! Operator-set types and comparison operators.
//!
//! Every leaf field of a query schema accepts one family of operators:
//! ```text
//! String  -> contains, eq, startsWith, ...
//! Number  -> eq, gt, gte, lt, lte, ...   (Decimal and Int inputs)
//! Date    -> eq, gt, gte, lt, lte, ...   (DateTime input)
//! Boolean -> eq, neq
//! ```

use serde::{Deserialize, Serialize};

/// The operator family a leaf field accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorSetType {
    /// Substring matching. Also the fallback for unknown leaf shapes.
    #[default]
    String,
    Number,
    Date,
    Boolean,
}

impl OperatorSetType {
    /// Lowercase name, as used in field tables and schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorSetType::String => "string",
            OperatorSetType::Number => "number",
            OperatorSetType::Date => "date",
            OperatorSetType::Boolean => "boolean",
        }
    }

    /// Try to parse from a lowercase name (`"string"`, `"number"`, ...).
    ///
    /// `"decimal"`, `"int"` and `"datetime"` are accepted as aliases so that
    /// names lifted from a GraphQL schema work unchanged.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(OperatorSetType::String),
            "number" | "decimal" | "int" => Some(OperatorSetType::Number),
            "date" | "datetime" => Some(OperatorSetType::Date),
            "boolean" | "bool" => Some(OperatorSetType::Boolean),
            _ => None,
        }
    }

    /// Operator set of a well-known GraphQL operation filter input type.
    pub fn from_graphql_input(type_name: &str) -> Option<Self> {
        match type_name {
            "StringOperationFilterInput" => Some(OperatorSetType::String),
            "DecimalOperationFilterInput" | "IntOperationFilterInput" => {
                Some(OperatorSetType::Number)
            }
            "DateTimeOperationFilterInput" => Some(OperatorSetType::Date),
            "BooleanOperationFilterInput" => Some(OperatorSetType::Boolean),
            _ => None,
        }
    }
}

/// Operators that appear as leaf keys in a filter expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Neq,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// Key used in the serialized expression (`{"gte": 10}`).
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Neq => "neq",
            Comparison::Contains => "contains",
            Comparison::Gt => "gt",
            Comparison::Gte => "gte",
            Comparison::Lt => "lt",
            Comparison::Lte => "lte",
        }
    }
}

/// Object keys that are combinators or operators rather than field names.
///
/// A schema walk never descends into, or emits a path for, these keys.
pub const RESERVED_FILTER_KEYS: &[&str] = &[
    "and",
    "or",
    "contains",
    "endsWith",
    "eq",
    "in",
    "ncontains",
    "nendsWith",
    "neq",
    "nin",
    "nstartsWith",
    "startsWith",
    "gt",
    "gte",
    "lt",
    "lte",
    "ngt",
    "ngte",
    "nlt",
    "nlte",
    "none",
    "all",
    "any",
    "some",
];

/// True if `key` is a combinator/operator keyword.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_FILTER_KEYS.contains(&key)
}
