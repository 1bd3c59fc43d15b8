//! GraphQL request bodies carrying a filter expression.
//!
//! ```text
//! {
//!   "query": "query GetBonds($where: BondFilterInput, $first: Int) { ... }",
//!   "variables": { "where": { "and": [ ... ] }, "first": 50 }
//! }
//! ```

use filter_core::FilterExpression;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::ProtocolError;

/// Variable name the filter expression is bound to.
pub const WHERE_VARIABLE: &str = "where";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,

    /// `where` first, then any extra variables in insertion order.
    pub variables: IndexMap<String, Value>,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>, filter: &FilterExpression) -> Self {
        let mut variables = IndexMap::new();
        variables.insert(WHERE_VARIABLE.to_string(), filter.to_json());

        GraphQlRequest {
            query: query.into(),
            variables,
        }
    }

    /// Add a paging / ordering variable (`first`, `after`, `order`, ...).
    ///
    /// Setting `where` again replaces the filter.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn filter(&self) -> Option<&Value> {
        self.variables.get(WHERE_VARIABLE)
    }

    pub fn to_json_string(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
