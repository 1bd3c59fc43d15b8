//! Schema documents: a JSON description of filter input types.
//!
//! Generated from the query service's schema and decoded into a
//! [`filter_core::Schema`] whose root is a lazy reference to `root`.
//!
//! ```text
//! {
//!   "root": "BondFilterInput",
//!   "types": {
//!     "BondFilterInput": { "object": {
//!       "and":        { "optional": { "array": { "lazy": "BondFilterInput" } } },
//!       "name":       { "optional": { "lazy": "StringOperationFilterInput" } },
//!       "couponRate": { "optional": { "operatorSet": "decimal" } },
//!       "board":      "scalar"
//!     } }
//!   }
//! }
//! ```
//!
//! Node forms: `object`, `optional`, `nullable`, `array`, `lazy` (a type
//! name), `operatorSet` (`string` / `number` / `date` / `boolean`, plus the
//! `decimal` / `int` / `datetime` / `bool` aliases) and the bare string
//! `"scalar"`. Lazy references to the standard `*OperationFilterInput` types
//! need no declaration.

use filter_core::{OperatorSetType, Schema, SchemaNode, SchemaRegistry};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProtocolError;

/// Raw document as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    /// Type whose fields are filterable.
    pub root: String,

    #[serde(default)]
    pub types: IndexMap<String, NodeDoc>,
}

/// One node of a schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeDoc {
    Object(IndexMap<String, NodeDoc>),
    Optional(Box<NodeDoc>),
    Nullable(Box<NodeDoc>),
    Array(Box<NodeDoc>),
    Lazy(String),
    OperatorSet(String),
    Scalar,
}

/// Decode a schema document into a [`Schema`] ready for translation.
pub fn decode_schema(input: &str) -> Result<Schema, ProtocolError> {
    let document: SchemaDocument = serde_json::from_str(input)?;
    document.into_schema()
}

impl SchemaDocument {
    pub fn into_schema(self) -> Result<Schema, ProtocolError> {
        if !self.types.contains_key(&self.root) {
            return Err(ProtocolError::UnknownRootType(self.root));
        }

        let mut registry = SchemaRegistry::new();
        for (name, node) in self.types {
            let node = node.into_node(&name)?;
            registry.insert(name, node);
        }

        debug!(root = self.root.as_str(), types = registry.len(), "decoded schema document");

        // The root goes through the registry too, so a field pointing back
        // at it is recognised as a cycle.
        Ok(Schema::with_registry(SchemaNode::Lazy(self.root), registry))
    }
}

impl NodeDoc {
    /// `at` names the node's position, for error messages.
    fn into_node(self, at: &str) -> Result<SchemaNode, ProtocolError> {
        Ok(match self {
            NodeDoc::Object(fields) => SchemaNode::Object(
                fields
                    .into_iter()
                    .map(|(key, node)| {
                        let node = node.into_node(&format!("{at}.{key}"))?;
                        Ok((key, node))
                    })
                    .collect::<Result<IndexMap<_, _>, ProtocolError>>()?,
            ),
            NodeDoc::Optional(inner) => SchemaNode::optional(inner.into_node(at)?),
            NodeDoc::Nullable(inner) => SchemaNode::nullable(inner.into_node(at)?),
            NodeDoc::Array(inner) => SchemaNode::array(inner.into_node(at)?),
            NodeDoc::Lazy(name) => SchemaNode::Lazy(name),
            NodeDoc::OperatorSet(name) => match OperatorSetType::from_name(&name) {
                Some(operator_set) => SchemaNode::OperatorSet(operator_set),
                None => {
                    return Err(ProtocolError::UnknownOperatorSet {
                        path: at.to_string(),
                        name,
                    })
                }
            },
            NodeDoc::Scalar => SchemaNode::Scalar,
        })
    }
}
