//! Declared field tables (TOML).
//!
//! The flat alternative to a schema document: every filterable leaf listed
//! with its operator set, in match-priority order.
//!
//! ```toml
//! [fields]
//! "name" = "string"
//! "couponRate" = "decimal"
//! "instrument.ticker" = "string"
//! "volumes.lastTradeDate" = "datetime"
//! ```

use filter_core::{FieldDescriptor, OperatorSetType, SchemaFieldIndex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProtocolError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldTable {
    /// Dotted path -> operator set name.
    #[serde(default)]
    pub fields: IndexMap<String, String>,
}

impl FieldTable {
    pub fn into_index(self) -> Result<SchemaFieldIndex, ProtocolError> {
        let descriptors = self
            .fields
            .into_iter()
            .map(|(path, name)| match OperatorSetType::from_name(&name) {
                Some(operator_set) => Ok(FieldDescriptor::from_dotted(&path, operator_set)),
                None => Err(ProtocolError::UnknownOperatorSet { path, name }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SchemaFieldIndex::from_descriptors(descriptors))
    }

    /// Table listing every field of `index`, e.g. to snapshot a walked schema.
    pub fn from_index(index: &SchemaFieldIndex) -> Self {
        FieldTable {
            fields: index
                .iter()
                .map(|f| (f.dotted_path(), f.operator_set.as_str().to_string()))
                .collect(),
        }
    }
}

/// Parse a TOML field table into an index.
pub fn decode_field_table(input: &str) -> Result<SchemaFieldIndex, ProtocolError> {
    let table: FieldTable = toml::from_str(input)?;
    let index = table.into_index()?;

    debug!(fields = index.len(), "loaded field table");
    Ok(index)
}

/// Render an index as a TOML field table.
pub fn encode_field_table(index: &SchemaFieldIndex) -> Result<String, ProtocolError> {
    Ok(toml::to_string(&FieldTable::from_index(index))?)
}
