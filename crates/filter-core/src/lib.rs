//! filter-core
//!
//! Pure table-filter translation logic:
//! - filter values and table filters (UI input)
//! - schema descriptions and the flat field index built from them
//! - declared field groupings for schema-less queries
//! - filter expression trees (query-service input)
//! - the translator tying them together

pub mod interval;
pub mod operator_set;
pub mod filter_value;
pub mod schema;
pub mod field_index;
pub mod fields_mapping;
pub mod expression;
pub mod date;
pub mod translator;
pub mod error;

pub use interval::IntervalBound;
pub use operator_set::{Comparison, OperatorSetType};

pub use filter_value::{FilterValue, TableFilter};
pub use schema::{LazyTarget, Schema, SchemaNode, SchemaRegistry};
pub use field_index::{FieldDescriptor, SchemaFieldIndex};
pub use fields_mapping::{FieldGroup, FieldsMapping, FilterKind};

pub use expression::FilterExpression;
pub use translator::FilterTranslator;
pub use error::{DropReason, DroppedFilter, TranslationReport};
