//! Table filter -> filter expression translation.
//!
//! Two entry points:
//! - **schema mode**: keys are matched against a [`SchemaFieldIndex`] (walked
//!   from a [`Schema`] or declared up front) and typed by each field's
//!   operator set.
//! - **group mode**: keys are placed and typed by two declared
//!   [`FieldsMapping`]s, for queries with no schema at hand.
//!
//! Both produce `{"and": [..]}` with one term per surviving key, in key
//! order. A key that cannot be translated is left out and never fails the
//! call; the `*_report` variants say which keys were left out and why.

use tracing::debug;

use crate::date::form_date_to_iso;
use crate::error::{DropReason, DroppedFilter, TranslationReport};
use crate::expression::FilterExpression;
use crate::field_index::{FieldDescriptor, SchemaFieldIndex};
use crate::fields_mapping::{FieldGroup, FieldsMapping, FilterKind};
use crate::filter_value::{FilterValue, TableFilter};
use crate::interval::{split_interval_key, IntervalBound};
use crate::operator_set::{Comparison, OperatorSetType};
use crate::schema::Schema;

/// Schema-mode translator bound to one field index.
///
/// Build once per schema and reuse; translation does not mutate it.
#[derive(Debug, Clone, Default)]
pub struct FilterTranslator {
    index: SchemaFieldIndex,
}

impl FilterTranslator {
    /// Translator over a declared field index.
    pub fn new(index: SchemaFieldIndex) -> Self {
        FilterTranslator { index }
    }

    /// Translator over the fields found by walking `schema`.
    pub fn from_schema(schema: &Schema) -> Self {
        FilterTranslator::new(SchemaFieldIndex::from_schema(schema))
    }

    pub fn index(&self) -> &SchemaFieldIndex {
        &self.index
    }

    pub fn translate(&self, filters: &TableFilter) -> FilterExpression {
        self.translate_report(filters).expression
    }

    pub fn translate_report(&self, filters: &TableFilter) -> TranslationReport {
        Self::translate_with_index_report(filters, &self.index)
    }

    // -------------------------------------------------------------------------
    // One-shot entry points
    // -------------------------------------------------------------------------

    /// Walk `schema` and translate `filters` against it.
    pub fn translate_with_schema(filters: &TableFilter, schema: &Schema) -> FilterExpression {
        FilterTranslator::from_schema(schema).translate(filters)
    }

    pub fn translate_with_schema_report(filters: &TableFilter, schema: &Schema) -> TranslationReport {
        FilterTranslator::from_schema(schema).translate_report(filters)
    }

    /// Translate against an already built (or declared) index.
    pub fn translate_with_index(filters: &TableFilter, index: &SchemaFieldIndex) -> FilterExpression {
        Self::translate_with_index_report(filters, index).expression
    }

    pub fn translate_with_index_report(
        filters: &TableFilter,
        index: &SchemaFieldIndex,
    ) -> TranslationReport {
        collect_terms(filters, |key, value| {
            let (field, bound) = index.find_for_key(key).ok_or(DropReason::UnknownField)?;
            schema_term(value, field, bound)
        })
    }

    /// Group mode: place keys by `nested_fields`, compare by `filter_types`.
    pub fn translate_with_groups(
        filters: &TableFilter,
        nested_fields: &FieldsMapping,
        filter_types: &FieldsMapping,
    ) -> FilterExpression {
        Self::translate_with_groups_report(filters, nested_fields, filter_types).expression
    }

    pub fn translate_with_groups_report(
        filters: &TableFilter,
        nested_fields: &FieldsMapping,
        filter_types: &FieldsMapping,
    ) -> TranslationReport {
        collect_terms(filters, |key, value| {
            group_term(key, value, nested_fields, filter_types)
        })
    }
}

// -----------------------------------------------------------------------------
// Internal helpers
// -----------------------------------------------------------------------------

/// Run `term` over every key in order, keeping successes and logging drops.
fn collect_terms<F>(filters: &TableFilter, mut term: F) -> TranslationReport
where
    F: FnMut(&str, &FilterValue) -> Result<FilterExpression, DropReason>,
{
    let mut terms = Vec::with_capacity(filters.len());
    let mut dropped = Vec::new();

    for (key, value) in filters {
        match term(key.as_str(), value) {
            Ok(expression) => terms.push(expression),
            Err(reason) => {
                debug!(key = key.as_str(), %reason, "dropping filter term");
                dropped.push(DroppedFilter {
                    key: key.clone(),
                    reason,
                });
            }
        }
    }

    TranslationReport {
        expression: FilterExpression::and(terms),
        dropped,
    }
}

/// Schema-mode term for one key.
///
/// An array value turns the leaf field into an `or` of `eq` per element,
/// whatever the field's operator set; outer path segments still wrap it.
fn schema_term(
    value: &FilterValue,
    field: &FieldDescriptor,
    bound: Option<IntervalBound>,
) -> Result<FilterExpression, DropReason> {
    if matches!(value, FilterValue::Null) {
        return Err(DropReason::EmptyValue);
    }

    let (leaf_name, outer) = match field.path.split_last() {
        Some(split) => split,
        None => return Err(DropReason::UnknownField),
    };

    let leaf = match value {
        FilterValue::Array(items) => FilterExpression::or(
            items
                .iter()
                .map(|item| FilterExpression::leaf(leaf_name.as_str(), Comparison::Eq, item.to_json()))
                .collect(),
        ),
        _ => FilterExpression::field(
            leaf_name.as_str(),
            typed_condition(field.operator_set, value, bound)?,
        ),
    };

    Ok(FilterExpression::nest(outer, leaf))
}

/// `{"<op>": value}` for a scalar value on a field of `operator_set`.
fn typed_condition(
    operator_set: OperatorSetType,
    value: &FilterValue,
    bound: Option<IntervalBound>,
) -> Result<FilterExpression, DropReason> {
    let comparison = bound.map_or(Comparison::Eq, IntervalBound::comparison);

    match operator_set {
        OperatorSetType::String => Ok(FilterExpression::condition(
            Comparison::Contains,
            value.to_json(),
        )),
        OperatorSetType::Number => Ok(FilterExpression::condition(comparison, number_of(value)?)),
        OperatorSetType::Boolean => Ok(FilterExpression::condition(Comparison::Eq, value.to_json())),
        OperatorSetType::Date => Ok(FilterExpression::condition(comparison, date_of(value)?)),
    }
}

/// Group-mode term for one key.
fn group_term(
    key: &str,
    value: &FilterValue,
    nested_fields: &FieldsMapping,
    filter_types: &FieldsMapping,
) -> Result<FilterExpression, DropReason> {
    if value.is_empty() {
        return Err(DropReason::EmptyValue);
    }

    let (base, bound) = split_interval_key(key);
    let group = nested_fields
        .group_of(base)
        .map(FieldGroup::from_name)
        .ok_or(DropReason::UnknownField)?;

    let kind = filter_types
        .group_of(key)
        .or_else(|| filter_types.group_of(base))
        .map_or(FilterKind::Text, FilterKind::from_name);

    // Group mode has no `eq` bound: a key without `From` is an upper bound.
    let comparison = match bound {
        Some(IntervalBound::From) => Comparison::Gte,
        _ => Comparison::Lte,
    };

    let leaf = match kind {
        FilterKind::MultiSelect => {
            let items = match value {
                FilterValue::Array(items) => items.as_slice(),
                single => std::slice::from_ref(single),
            };
            FilterExpression::or(
                items
                    .iter()
                    .map(|item| FilterExpression::leaf(key, Comparison::Eq, item.to_json()))
                    .collect(),
            )
        }
        FilterKind::Interval => FilterExpression::leaf(base, comparison, number_of(value)?),
        FilterKind::Bool => FilterExpression::leaf(key, Comparison::Eq, value.to_json()),
        FilterKind::Date => FilterExpression::leaf(base, comparison, date_of(value)?),
        FilterKind::Text => FilterExpression::leaf(key, Comparison::Contains, value.to_json()),
    };

    Ok(match group {
        FieldGroup::Root => leaf,
        FieldGroup::Nested(name) => FilterExpression::field(name, leaf),
    })
}

fn number_of(value: &FilterValue) -> Result<serde_json::Number, DropReason> {
    value
        .to_number()
        .ok_or_else(|| DropReason::InvalidNumber(value.to_json().to_string()))
}

fn date_of(value: &FilterValue) -> Result<String, DropReason> {
    let text = value.as_str().ok_or(DropReason::UnsupportedValue)?;
    form_date_to_iso(text).ok_or_else(|| DropReason::InvalidDate(text.to_string()))
}
