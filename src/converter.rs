//! Element-to-mapping conversion.
//!
//! Conventions:
//! - child elements sharing a tag are collected into a list, a tag seen
//!   once keeps its bare value
//! - attributes are added with an `@` prefix
//! - text is added as `#text` when the element also has attributes or
//!   children, otherwise the element's value is the text itself

use crate::element::Element;
use crate::node::{GroupedValue, Mapping, Node, Value};
use indexmap::IndexMap;

const ATTRIBUTE_PREFIX: &str = "@";
const TEXT_KEY: &str = "#text";

/// Convert an element and its whole subtree into a [`Node`].
///
/// Keys are ordered child groups first, then attributes, then `#text`.
/// A later key that collides with an earlier one replaces its value in
/// place.
pub fn convert(elem: &Element) -> Node {
    let has_children = !elem.children().is_empty();
    let has_attributes = !elem.attributes().is_empty();

    let mut mapping = Mapping::new();

    if has_children {
        let mut grouped: IndexMap<&str, Vec<Value>> = IndexMap::new();
        for child in elem.children() {
            let (_, value) = convert(child).into_parts();
            grouped.entry(child.tag()).or_default().push(value);
        }

        for (tag, mut values) in grouped {
            let group = if values.len() == 1 {
                GroupedValue::Single(values.remove(0))
            } else {
                GroupedValue::Many(values)
            };
            mapping.insert(tag, group);
        }
    }

    for (name, value) in elem.attributes() {
        mapping.insert(
            format!("{ATTRIBUTE_PREFIX}{name}"),
            GroupedValue::Single(Value::Leaf(value.clone())),
        );
    }

    let text = elem.text().unwrap_or_default().trim();

    let value = if has_children || has_attributes {
        if !text.is_empty() {
            mapping.insert(TEXT_KEY, GroupedValue::Single(Value::Leaf(text.to_string())));
        }
        Value::Composite(mapping)
    } else if !text.is_empty() {
        Value::Leaf(text.to_string())
    } else {
        Value::Absent
    };

    Node::new(elem.tag(), value)
}

/// Alias of [`convert`].
pub fn load(elem: &Element) -> Node {
    convert(elem)
}
