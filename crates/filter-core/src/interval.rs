//! Interval bounds (`From` / `To`) carried as filter-key suffixes.

use crate::operator_set::Comparison;

/// One side of an interval filter: `priceFrom` / `priceTo`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntervalBound {
    From,
    To,
}

impl IntervalBound {
    /// Suffix as it appears on a filter key.
    pub fn suffix(self) -> &'static str {
        match self {
            IntervalBound::From => "From",
            IntervalBound::To => "To",
        }
    }

    /// Inclusive comparison for this side: `From` -> `gte`, `To` -> `lte`.
    pub fn comparison(self) -> Comparison {
        match self {
            IntervalBound::From => Comparison::Gte,
            IntervalBound::To => Comparison::Lte,
        }
    }

    /// Detect a trailing `From` / `To` on a key.
    ///
    /// A key that is *only* the suffix (`"To"`) carries no bound.
    pub fn of_key(key: &str) -> Option<Self> {
        [IntervalBound::From, IntervalBound::To]
            .into_iter()
            .find(|b| key.len() > b.suffix().len() && key.ends_with(b.suffix()))
    }
}

/// Split a filter key into its base field name and interval bound.
///
/// ```
/// use filter_core::interval::{split_interval_key, IntervalBound};
///
/// assert_eq!(split_interval_key("priceFrom"), ("price", Some(IntervalBound::From)));
/// assert_eq!(split_interval_key("ticker"), ("ticker", None));
/// ```
pub fn split_interval_key(key: &str) -> (&str, Option<IntervalBound>) {
    match IntervalBound::of_key(key) {
        Some(bound) => (&key[..key.len() - bound.suffix().len()], Some(bound)),
        None => (key, None),
    }
}
