//! Structural description of a query-filter input schema.
//!
//! A schema is a tree of wrapper nodes (optional, nullable, array, lazy
//! reference) around object nodes, bottoming out at operator-set leaves.
//! Leaves carry their [`OperatorSetType`] explicitly; nothing is inferred
//! from the shape of a node.
//!
//! Lazy references name another type in a [`SchemaRegistry`], which is how
//! recursive input types (`and: [BondFilterInput]`) are expressed without
//! building an infinite tree.


use indexmap::IndexMap;

use crate::operator_set::OperatorSetType;

/// One node of a schema description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Named fields, in declaration order.
    Object(IndexMap<String, SchemaNode>),

    /// Optional wrapper (`InputMaybe<T>`). Contributes no path segment.
    Optional(Box<SchemaNode>),

    /// Nullable wrapper. Contributes no path segment.
    Nullable(Box<SchemaNode>),

    /// List of the element type. Contributes no path segment.
    Array(Box<SchemaNode>),

    /// Deferred reference to a named type in the registry.
    Lazy(String),

    /// Operation filter input with a known operator family.
    OperatorSet(OperatorSetType),

    /// Any other leaf (enum, raw scalar). Filters on it as a string.
    Scalar,
}

impl SchemaNode {
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
    {
        SchemaNode::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn optional(inner: SchemaNode) -> Self {
        SchemaNode::Optional(Box::new(inner))
    }

    pub fn nullable(inner: SchemaNode) -> Self {
        SchemaNode::Nullable(Box::new(inner))
    }

    pub fn array(inner: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(inner))
    }

    pub fn lazy(type_name: impl Into<String>) -> Self {
        SchemaNode::Lazy(type_name.into())
    }

    /// `Optional(Nullable(..))`, the shape generated for every input field.
    pub fn maybe(inner: SchemaNode) -> Self {
        SchemaNode::optional(SchemaNode::nullable(inner))
    }
}

/// Named schema types, used to resolve [`SchemaNode::Lazy`] references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    types: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// Register (or replace) a named type.
    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        self.types.insert(name.into(), node);
    }

    pub fn with(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Resolve a lazy reference.
    ///
    /// Names of the well-known GraphQL operation filter inputs always resolve
    /// to their operator set, registered or not.
    pub fn resolve(&self, name: &str) -> Option<LazyTarget<'_>> {
        if let Some(operator_set) = OperatorSetType::from_graphql_input(name) {
            return Some(LazyTarget::OperatorSet(operator_set));
        }
        self.types.get(name).map(LazyTarget::Node)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// What a lazy reference points at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LazyTarget<'a> {
    OperatorSet(OperatorSetType),
    Node(&'a SchemaNode),
}

/// A root input type plus the named types its lazy references point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub root: SchemaNode,
    pub registry: SchemaRegistry,
}

impl Schema {
    pub fn new(root: SchemaNode) -> Self {
        Schema {
            root,
            registry: SchemaRegistry::new(),
        }
    }

    pub fn with_registry(root: SchemaNode, registry: SchemaRegistry) -> Self {
        Schema { root, registry }
    }
}

impl From<SchemaNode> for Schema {
    fn from(root: SchemaNode) -> Self {
        Schema::new(root)
    }
}
