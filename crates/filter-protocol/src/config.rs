//! Filter configuration for a listing widget.
//!
//! One TOML file declares how a widget's table filter maps onto its query:
//!
//! ```toml
//! field_table = "bond_fields.toml"   # optional, relative to this file
//!
//! [nested_fields]
//! rootFields = ["couponRate", "boardCodes"]
//! basicInformation = ["maturityDate", "isGuaranteed"]
//!
//! [filter_types]
//! interval = ["couponRateFrom", "couponRateTo"]
//! date = ["maturityDateFrom", "maturityDateTo"]
//! bool = ["isGuaranteed"]
//! multiSelect = ["boardCodes"]
//! ```
//!
//! The file path can come from the environment:
//!
//! - `FILTER_CONFIG_PATH` (default: unset, meaning an empty configuration)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use filter_core::{FieldsMapping, FilterExpression, FilterTranslator, SchemaFieldIndex, TableFilter};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ProtocolError;
use crate::field_table::decode_field_table;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "FILTER_CONFIG_PATH";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Where each key lives (`rootFields` or an object name).
    #[serde(default)]
    pub nested_fields: FieldsMapping,

    /// How each key is compared.
    #[serde(default)]
    pub filter_types: FieldsMapping,

    /// Declared field table for schema mode.
    #[serde(default)]
    pub field_table: Option<PathBuf>,

    /// Directory relative `field_table` paths resolve against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl FilterConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ProtocolError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let path = path.as_ref();
        let input = read_to_string(path)?;

        let mut config = FilterConfig::from_toml_str(&input)?;
        config.base_dir = path.parent().map(Path::to_path_buf);

        info!(path = %path.display(), "loaded filter config");
        Ok(config)
    }

    /// Load from `FILTER_CONFIG_PATH`, falling back to an empty
    /// configuration when the variable is unset.
    pub fn from_env() -> Result<Self, ProtocolError> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => FilterConfig::from_path(PathBuf::from(path)),
            None => {
                debug!("{CONFIG_PATH_ENV} not set, using empty filter config");
                Ok(FilterConfig::default())
            }
        }
    }

    /// Resolved location of the declared field table, if any.
    pub fn field_table_path(&self) -> Option<PathBuf> {
        let path = self.field_table.as_ref()?;
        Some(match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.clone(),
        })
    }

    /// Read and decode the declared field table.
    pub fn load_field_table(&self) -> Result<Option<SchemaFieldIndex>, ProtocolError> {
        match self.field_table_path() {
            Some(path) => decode_field_table(&read_to_string(&path)?).map(Some),
            None => Ok(None),
        }
    }

    /// Group-mode translation with this configuration's mappings.
    pub fn translate_groups(&self, filters: &TableFilter) -> FilterExpression {
        FilterTranslator::translate_with_groups(filters, &self.nested_fields, &self.filter_types)
    }
}

fn read_to_string(path: &Path) -> Result<String, ProtocolError> {
    fs::read_to_string(path).map_err(|source| ProtocolError::Io {
        path: path.to_path_buf(),
        source,
    })
}
