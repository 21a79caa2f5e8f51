//! The output side of a conversion.
//!
//! A [`Node`] is a single `{tag: value}` pair. The value is a closed set of
//! shapes so callers match on them instead of probing a dynamic map:
//!
//! - [`Value::Absent`] for an empty element (JSON `null`)
//! - [`Value::Leaf`] for a text-only element
//! - [`Value::Composite`] for anything with attributes or children
//!
//! Inside a composite, repeated child tags become [`GroupedValue::Many`]
//! and unique ones [`GroupedValue::Single`].

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// The converted form of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: String,
    value: Value,
}

impl Node {
    pub fn new(tag: impl Into<String>, value: Value) -> Self {
        Self {
            tag: tag.into(),
            value,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.tag, self.value)
    }

    /// Convert to a `serde_json::Value`, keeping mapping key order.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(self.tag.clone(), self.value.to_json());
        serde_json::Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Absent,
    Leaf(String),
    Composite(Mapping),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Composite(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Absent => serde_json::Value::Null,
            Value::Leaf(text) => serde_json::Value::String(text.clone()),
            Value::Composite(mapping) => mapping.to_json(),
        }
    }
}

/// One slot of a composite mapping.
///
/// Whether a child tag decodes as `Single` or `Many` depends on how many
/// siblings share it in the data, not on any schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedValue {
    Single(Value),
    Many(Vec<Value>),
}

impl GroupedValue {
    pub fn as_single(&self) -> Option<&Value> {
        match self {
            GroupedValue::Single(value) => Some(value),
            GroupedValue::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Value]> {
        match self {
            GroupedValue::Single(_) => None,
            GroupedValue::Many(values) => Some(values),
        }
    }

    /// Iterate over the contained values, one or many alike.
    pub fn values(&self) -> std::slice::Iter<'_, Value> {
        match self {
            GroupedValue::Single(value) => std::slice::from_ref(value).iter(),
            GroupedValue::Many(values) => values.iter(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            GroupedValue::Single(value) => value.to_json(),
            GroupedValue::Many(values) => {
                serde_json::Value::Array(values.iter().map(Value::to_json).collect())
            }
        }
    }
}

/// Insertion-ordered keys of a composite value.
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: IndexMap<String, GroupedValue>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: GroupedValue) -> Option<GroupedValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&GroupedValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_json(&self) -> serde_json::Value {
        let map = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.tag, &self.value)?;
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Leaf(text) => serializer.serialize_str(text),
            Value::Composite(mapping) => mapping.serialize(serializer),
        }
    }
}

impl Serialize for GroupedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupedValue::Single(value) => value.serialize(serializer),
            GroupedValue::Many(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
