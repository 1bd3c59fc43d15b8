//! filter-protocol
//!
//! Wire-level encoding/decoding around `filter-core`.
//!
//! This crate turns the strings the terminal actually moves around into
//! core types and back:
//!
//! - [`json_codec`]   : table filters in, filter expressions out (JSON)
//! - [`schema_codec`] : schema documents describing filter input types
//! - [`field_table`]  : declared field tables (TOML)
//! - [`config`]       : per-widget filter configuration (TOML + env)
//! - [`request`]      : GraphQL request bodies carrying an expression

pub mod error;
pub mod json_codec;
pub mod schema_codec;
pub mod field_table;
pub mod config;
pub mod request;

pub use error::ProtocolError;

pub use json_codec::{
    decode_table_filter,
    encode_expression,
    encode_expression_pretty,
    encode_table_filter,
};
pub use schema_codec::decode_schema;
pub use field_table::{decode_field_table, encode_field_table};
pub use config::FilterConfig;
pub use request::GraphQlRequest;
