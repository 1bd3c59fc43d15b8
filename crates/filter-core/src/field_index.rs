//! Field index: dotted leaf path -> operator set.
//!
//! Built either by walking a [`SchemaNode`] tree or from a statically
//! declared descriptor table. Either way the translator only ever sees the
//! flat index.

use indexmap::IndexMap;
use tracing::trace;

use crate::interval::{split_interval_key, IntervalBound};
use crate::operator_set::{is_reserved_key, OperatorSetType};
use crate::schema::{LazyTarget, Schema, SchemaNode, SchemaRegistry};

/// A filterable leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Path segments from the schema root, e.g. `["instrument", "ticker"]`.
    pub path: Vec<String>,

    /// Operators the leaf accepts.
    pub operator_set: OperatorSetType,
}

impl FieldDescriptor {
    pub fn new<S: Into<String>>(
        path: impl IntoIterator<Item = S>,
        operator_set: OperatorSetType,
    ) -> Self {
        FieldDescriptor {
            path: path.into_iter().map(Into::into).collect(),
            operator_set,
        }
    }

    /// Parse a dotted path (`"instrument.ticker"`).
    pub fn from_dotted(path: &str, operator_set: OperatorSetType) -> Self {
        FieldDescriptor::new(path.split('.'), operator_set)
    }

    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    /// Last path segment: the name a table-filter key is matched against.
    pub fn leaf_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Depth of the expression this field produces.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Flat index of every filterable leaf of a schema, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFieldIndex {
    fields: IndexMap<String, FieldDescriptor>,
}

impl SchemaFieldIndex {
    pub fn new() -> Self {
        SchemaFieldIndex::default()
    }

    /// Walk the schema's root type, resolving lazy references through its
    /// registry.
    pub fn from_schema(schema: &Schema) -> Self {
        let walker = SchemaWalker {
            registry: &schema.registry,
        };
        let mut active = Vec::new();
        let index: SchemaFieldIndex = walker.walk(&schema.root, &mut active).into_iter().collect();

        trace!(fields = index.len(), "built schema field index");
        index
    }

    /// Build from a declared table of descriptors.
    ///
    /// A later descriptor for the same path replaces the earlier one, so
    /// every path keeps exactly one operator set.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        descriptors.into_iter().collect()
    }

    pub fn insert(&mut self, descriptor: FieldDescriptor) {
        self.fields.insert(descriptor.dotted_path(), descriptor);
    }

    pub fn get(&self, dotted_path: &str) -> Option<&FieldDescriptor> {
        self.fields.get(dotted_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find the field a table-filter key refers to.
    ///
    /// A field matches when its leaf name equals the key, or the key with a
    /// trailing `From`/`To` removed. The first matching field in index order
    /// wins. The bound is taken from the key's suffix.
    pub fn find_for_key(&self, key: &str) -> Option<(&FieldDescriptor, Option<IntervalBound>)> {
        let (base, bound) = split_interval_key(key);

        self.fields
            .values()
            .find(|field| {
                let leaf = field.leaf_name();
                leaf == key || leaf == base
            })
            .map(|field| (field, bound))
    }
}

impl FromIterator<FieldDescriptor> for SchemaFieldIndex {
    fn from_iter<T: IntoIterator<Item = FieldDescriptor>>(iter: T) -> Self {
        let mut index = SchemaFieldIndex::new();
        for descriptor in iter {
            index.insert(descriptor);
        }
        index
    }
}

// -----------------------------------------------------------------------------
// Schema walk
// -----------------------------------------------------------------------------

/// What a node turns into once wrappers are peeled off.
enum Unwrapped<'a> {
    Object(&'a IndexMap<String, SchemaNode>),
    Leaf(OperatorSetType),
    Opaque,
}

struct SchemaWalker<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaWalker<'a> {
    /// Leaf descriptors below `node`, paths relative to `node`.
    ///
    /// `active` holds the lazy type names currently being expanded; meeting
    /// one of them again ends the descent there.
    fn walk(&self, node: &'a SchemaNode, active: &mut Vec<&'a str>) -> Vec<FieldDescriptor> {
        let mut entered = Vec::new();
        let fields = match self.unwrap(node, &mut entered, active) {
            Unwrapped::Object(fields) => fields,
            Unwrapped::Leaf(_) | Unwrapped::Opaque => return Vec::new(),
        };

        let depth = active.len();
        active.extend(entered);

        let mut out = Vec::new();
        for (key, value) in fields.iter().filter(|(key, _)| !is_reserved_key(key)) {
            let nested = self.walk(value, active);

            if nested.is_empty() {
                let operator_set = self.leaf_type(value, active);
                out.push(FieldDescriptor::new([key.as_str()], operator_set));
            } else {
                out.extend(nested.into_iter().map(|mut sub| {
                    sub.path.insert(0, key.clone());
                    sub
                }));
            }
        }

        active.truncate(depth);
        out
    }

    /// Operator set of a leaf value; anything untagged filters as a string.
    fn leaf_type(&self, node: &'a SchemaNode, active: &[&'a str]) -> OperatorSetType {
        match self.unwrap(node, &mut Vec::new(), active) {
            Unwrapped::Leaf(operator_set) => operator_set,
            Unwrapped::Object(_) | Unwrapped::Opaque => OperatorSetType::String,
        }
    }

    /// Peel optional / nullable / array / lazy wrappers.
    fn unwrap(
        &self,
        mut node: &'a SchemaNode,
        entered: &mut Vec<&'a str>,
        active: &[&'a str],
    ) -> Unwrapped<'a> {
        loop {
            node = match node {
                SchemaNode::Optional(inner) | SchemaNode::Nullable(inner) | SchemaNode::Array(inner) => {
                    inner.as_ref()
                }
                SchemaNode::Lazy(name) => {
                    let name = name.as_str();
                    if active.contains(&name) || entered.contains(&name) {
                        trace!(type_name = name, "lazy reference cycle, treating as leaf");
                        return Unwrapped::Opaque;
                    }
                    match self.registry.resolve(name) {
                        Some(LazyTarget::Node(target)) => {
                            entered.push(name);
                            target
                        }
                        Some(LazyTarget::OperatorSet(operator_set)) => return Unwrapped::Leaf(operator_set),
                        None => return Unwrapped::Opaque,
                    }
                }
                SchemaNode::Object(fields) => return Unwrapped::Object(fields),
                SchemaNode::OperatorSet(operator_set) => return Unwrapped::Leaf(*operator_set),
                SchemaNode::Scalar => return Unwrapped::Opaque,
            };
        }
    }
}
