//! Errors for every fallible decode in this crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A table filter must be a flat JSON object of scalars and arrays.
    #[error("unsupported value for filter key {key:?}")]
    UnsupportedValue { key: String },

    #[error("table filter must be a JSON object")]
    NotAnObject,

    #[error("unknown operator set {name:?} for {path:?}")]
    UnknownOperatorSet { path: String, name: String },

    #[error("failed to encode TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("root type {0:?} is not declared in the schema document")]
    UnknownRootType(String),
}
