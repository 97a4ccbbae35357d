//! The parsed-value representation emitted by a scan.

use std::collections::HashMap;

use serde_json::Value;

/// A parsed JSON value.
///
/// Numbers keep their literal source text instead of being converted, so the
/// original precision and formatting (`23.23e-6`, `-0.0`, long decimals)
/// survive the roundtrip. Object keys are unique with last-write-wins on
/// duplicates; insertion order is not preserved.
///
/// Children of arrays and objects are exclusively owned by their parent —
/// JSON has no sharing and no cycles, and neither does `Node`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    String(String),
    Number(String),
    Boolean(bool),
    Array(Vec<Node>),
    Object(HashMap<String, Node>),
}

/// Tag identifying a [`Node`] variant without borrowing its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::String(_) => NodeKind::String,
            Node::Number(_) => NodeKind::Number,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    /// The node's scalar text: decoded string content, number literal text,
    /// `"true"`/`"false"` for booleans. Null and container nodes have no
    /// scalar text and yield `""`.
    pub fn scalar_text(&self) -> &str {
        match self {
            Node::String(s) | Node::Number(s) => s,
            Node::Boolean(true) => "true",
            Node::Boolean(false) => "false",
            Node::Null | Node::Array(_) | Node::Object(_) => "",
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    /// True when the node carries nothing: no array elements, no object
    /// entries, and empty scalar text.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Null => true,
            Node::String(s) | Node::Number(s) => s.is_empty(),
            Node::Boolean(_) => false,
            Node::Array(items) => items.is_empty(),
            Node::Object(map) => map.is_empty(),
        }
    }
}

/// Convert a parsed tree into a `serde_json::Value`.
///
/// Number literal text is re-parsed; text that `serde_json` does not accept
/// as a number (which a well-formed document cannot produce, but the engine
/// does not validate untargeted content) falls back to a string value rather
/// than failing.
impl From<&Node> for Value {
    fn from(node: &Node) -> Value {
        match node {
            Node::Null => Value::Null,
            Node::String(s) => Value::String(s.clone()),
            Node::Number(text) => serde_json::from_str::<serde_json::Number>(text)
                .map(Value::Number)
                .unwrap_or_else(|_| Value::String(text.clone())),
            Node::Boolean(b) => Value::Bool(*b),
            Node::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
