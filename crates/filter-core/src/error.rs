//! Why a filter key did not make it into an expression.
//!
//! Translation itself is infallible: an anomaly only removes the offending
//! key's term. These types let callers see what was removed.

use thiserror::Error;

use crate::expression::FilterExpression;

/// Reason a single table-filter key was left out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    /// No schema field or declared group matches the key.
    #[error("no field matches the filter key")]
    UnknownField,

    /// `null`, `""` or `[]` in group mode.
    #[error("filter value is empty")]
    EmptyValue,

    /// Not a `DD.MM.YYYY` calendar date.
    #[error("invalid date {0:?}, expected DD.MM.YYYY")]
    InvalidDate(String),

    /// Not coercible to a number.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// Value shape the field cannot take (e.g. an array for a date bound).
    #[error("unsupported value for this field")]
    UnsupportedValue,
}

/// A key that was left out, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFilter {
    pub key: String,
    pub reason: DropReason,
}

/// Expression plus the keys it does not cover.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationReport {
    pub expression: FilterExpression,
    pub dropped: Vec<DroppedFilter>,
}

impl TranslationReport {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn dropped_keys(&self) -> impl Iterator<Item = &str> {
        self.dropped.iter().map(|d| d.key.as_str())
    }
}
