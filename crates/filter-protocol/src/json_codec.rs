//! JSON encoding/decoding for table filters and filter expressions.
//!
//! Table filter (UI -> translator), a flat object in key order:
//!
//! ```text
//! { "tickerFrom": null, "boardCodes": ["TQCB", "TQOB"], "couponRateFrom": 5 }
//! ```
//!
//! Filter expression (translator -> query service), single-key objects:
//!
//! ```text
//! { "and": [ { "couponRate": { "gte": 5 } } ] }
//! ```

use filter_core::{FilterExpression, FilterValue, TableFilter};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::ProtocolError;

/// Decode a JSON table filter, keeping key order.
pub fn decode_table_filter(input: &str) -> Result<TableFilter, ProtocolError> {
    // `Map` is sorted unless serde_json's `preserve_order` is on, so go
    // through an ordered map of raw values instead.
    let raw: IndexMap<String, Value> = match serde_json::from_str(input) {
        Ok(raw) => raw,
        Err(e) if e.is_data() => return Err(ProtocolError::NotAnObject),
        Err(e) => return Err(e.into()),
    };

    let filter = from_entries(raw)?;

    trace!(keys = filter.len(), "decoded table filter");
    Ok(filter)
}

/// Convert an already parsed JSON object into a table filter.
pub fn table_filter_from_map(map: Map<String, Value>) -> Result<TableFilter, ProtocolError> {
    from_entries(map)
}

fn from_entries(
    entries: impl IntoIterator<Item = (String, Value)>,
) -> Result<TableFilter, ProtocolError> {
    entries
        .into_iter()
        .map(|(key, value)| match FilterValue::from_json(value) {
            Some(value) => Ok((key, value)),
            None => Err(ProtocolError::UnsupportedValue { key }),
        })
        .collect()
}

/// Encode a table filter back to JSON (e.g. to persist widget settings).
pub fn encode_table_filter(filter: &TableFilter) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(filter)?)
}

/// Compact JSON for a request body.
pub fn encode_expression(expression: &FilterExpression) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(expression)?)
}

/// Indented JSON, for logs and debugging.
pub fn encode_expression_pretty(expression: &FilterExpression) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string_pretty(expression)?)
}
