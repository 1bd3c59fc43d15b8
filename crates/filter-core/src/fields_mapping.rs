//! Declared field groupings for schema-less translation.
//!
//! Two mappings drive group mode, both `group name -> filter keys`:
//!
//! - *nested fields*: which object a key lives under. The `rootFields` group
//!   holds keys that sit directly on the query root.
//! - *filter types*: how a key is compared (`multiSelect`, `interval`,
//!   `bool`, `date`; anything else is a substring match).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Group name for keys that live directly on the query root.
pub const ROOT_FIELDS_GROUP: &str = "rootFields";

/// Group name -> member filter keys, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldsMapping {
    groups: IndexMap<String, Vec<String>>,
}

impl FieldsMapping {
    pub fn new() -> Self {
        FieldsMapping::default()
    }

    /// Builder-style: add a group with its keys.
    pub fn with_group<K, I>(mut self, group: impl Into<String>, keys: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        self.insert(group, keys);
        self
    }

    pub fn insert<K, I>(&mut self, group: impl Into<String>, keys: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = K>,
    {
        self.groups
            .insert(group.into(), keys.into_iter().map(Into::into).collect());
    }

    /// First group (in declaration order) listing `key`.
    pub fn group_of(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k == key))
            .map(|(group, _)| group.as_str())
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(g, keys)| (g.as_str(), keys.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Where a key's condition is placed in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldGroup {
    /// Appended to the top-level `and` as is.
    Root,

    /// Wrapped once as `{"<group>": condition}`.
    Nested(String),
}

impl FieldGroup {
    pub fn from_name(name: &str) -> Self {
        if name == ROOT_FIELDS_GROUP {
            FieldGroup::Root
        } else {
            FieldGroup::Nested(name.to_string())
        }
    }
}

/// How a key is compared in group mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Array value, `or` of `eq` per element.
    MultiSelect,

    /// Numeric bound, `gte` for `From` keys, `lte` otherwise.
    Interval,

    /// `eq` on the raw value.
    Bool,

    /// `DD.MM.YYYY` bound, `gte` for `From` keys, `lte` otherwise.
    Date,

    /// Substring match. The default.
    Text,
}

impl FilterKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "multiSelect" => FilterKind::MultiSelect,
            "interval" => FilterKind::Interval,
            "bool" => FilterKind::Bool,
            "date" => FilterKind::Date,
            _ => FilterKind::Text,
        }
    }
}
