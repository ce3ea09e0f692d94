//! Primitive codec: leaf values embedded as strings and singleton-or-list cardinality.

use std::fmt;

use crate::foundation::error::{JcutError, JcutResult};
use crate::tree::{Node, NodeMap};

/// Numeric leaf that remembers whether it was written as an integer or a real.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer literal such as `"12"`.
    Int(i64),
    /// Real literal such as `"0.5"`.
    Real(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => {
                let s = v.to_string();
                // Keep a decimal point so the value decodes back as a real.
                if v.is_finite() && !s.contains(['.', 'e', 'E']) {
                    write!(f, "{s}.0")
                } else {
                    f.write_str(&s)
                }
            }
        }
    }
}

/// Decode `"TRUE"`/`"FALSE"` (case-sensitive).
pub fn decode_bool(field: &str, s: &str) -> JcutResult<bool> {
    match s {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(JcutError::format(field, s, "boolean (TRUE/FALSE)")),
    }
}

/// Encode a boolean the way the interchange format expects it.
pub fn encode_bool(v: bool) -> &'static str {
    if v { "TRUE" } else { "FALSE" }
}

/// Decode an integer, falling back to a real.
pub fn decode_number(field: &str, s: &str) -> JcutResult<Number> {
    let t = s.trim();
    if let Ok(v) = t.parse::<i64>() {
        return Ok(Number::Int(v));
    }
    t.parse::<f64>()
        .map(Number::Real)
        .map_err(|_| JcutError::format(field, s, "number"))
}

/// Decode an integer-only leaf (frame counts, dimensions, indices).
pub fn decode_int(field: &str, s: &str) -> JcutResult<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| JcutError::format(field, s, "integer"))
}

/// Normalize a singleton-or-list field into an ordered slice view.
///
/// A mapping (or any other single value) becomes a one-element list; an absent or null field
/// becomes an empty list.
pub fn as_sequence(node: Option<&Node>) -> Vec<&Node> {
    match node {
        None | Some(Node::Null) => Vec::new(),
        Some(Node::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// View `node` as an element mapping.
pub fn mapping<'a>(node: &'a Node, entity: &'static str) -> JcutResult<&'a NodeMap> {
    node.as_object()
        .ok_or_else(|| JcutError::shape(entity, "<element>", "a mapping"))
}

/// Look up a child that may be absent.
pub fn optional<'a>(node: &'a Node, key: &str) -> Option<&'a Node> {
    node.as_object().and_then(|m| m.get(key))
}

/// Look up a child that must be present.
pub fn required<'a>(node: &'a Node, entity: &'static str, key: &str) -> JcutResult<&'a Node> {
    mapping(node, entity)?
        .get(key)
        .ok_or_else(|| JcutError::missing(entity, key))
}

/// Leaf text of a required field. An empty element (null) reads as `""`.
pub fn text<'a>(node: &'a Node, entity: &'static str, key: &str) -> JcutResult<&'a str> {
    leaf(required(node, entity, key)?, entity, key)
}

/// Leaf text of an optional field. An empty element reads as `None`.
pub fn optional_text<'a>(
    node: &'a Node,
    entity: &'static str,
    key: &str,
) -> JcutResult<Option<&'a str>> {
    match optional(node, key) {
        None | Some(Node::Null) => Ok(None),
        Some(v) => leaf(v, entity, key).map(Some),
    }
}

/// Integer value of a required field.
pub fn int(node: &Node, entity: &'static str, key: &str) -> JcutResult<i64> {
    decode_int(key, text(node, entity, key)?)
}

/// Non-negative integer value of a required field.
pub fn uint(node: &Node, entity: &'static str, key: &str) -> JcutResult<u32> {
    let raw = text(node, entity, key)?;
    let v = decode_int(key, raw)?;
    u32::try_from(v).map_err(|_| JcutError::format(key, raw, "unsigned 32-bit integer"))
}

/// Walk a chain of required child elements, e.g. `["media", "video"]`.
pub fn required_path<'a>(
    node: &'a Node,
    entity: &'static str,
    path: &[&str],
) -> JcutResult<&'a Node> {
    let mut cur = node;
    for (depth, key) in path.iter().enumerate() {
        cur = required(cur, entity, key).map_err(|err| match err {
            JcutError::Schema { message, .. } => JcutError::Schema {
                entity,
                field: path[..=depth].join("."),
                message,
            },
            other => other,
        })?;
    }
    Ok(cur)
}

/// Boolean value of a required field.
pub fn flag(node: &Node, entity: &'static str, key: &str) -> JcutResult<bool> {
    decode_bool(key, text(node, entity, key)?)
}

fn leaf<'a>(v: &'a Node, entity: &'static str, key: &str) -> JcutResult<&'a str> {
    match v {
        Node::String(s) => Ok(s.as_str()),
        Node::Null => Ok(""),
        _ => Err(JcutError::shape(entity, key, "a text leaf")),
    }
}

/// Dump a list of already-dumped nodes; always list-shaped, even for zero or one item.
pub fn list(items: impl IntoIterator<Item = Node>) -> Node {
    Node::Array(items.into_iter().collect())
}

/// Dump a leaf value as a string node.
pub fn string(v: impl ToString) -> Node {
    Node::String(v.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/tree/codec.rs"]
mod tests;
