//! Dotted/indexed path navigation over parsed trees.
//!
//! Operates purely on [`Node`] values already produced by a scan; nothing
//! here touches the lexer or the byte stream. Paths are dot-separated
//! segments, each optionally suffixed with a bracket index:
//!
//! - `"o.list[2].name"` — index into the `list` array, then descend
//! - `"o.list"` — no index on a terminal array selects all elements
//! - `"items.name"` — when `items` is an array of objects, the segment
//!   probes each element's map ("flatten" addressing, first hit wins)
//!
//! Unresolvable paths yield empty collections, never errors; the numeric
//! accessors coerce best-effort and default to zero.

use std::collections::HashMap;

use crate::node::Node;

/// Shared empty node returned where a lookup resolves to nothing.
static EMPTY_NODE: Node = Node::Null;

/// One parsed path segment: a property name plus an optional array index.
/// `None` is the wildcard meaning "all elements"; an unparsable index also
/// degrades to the wildcard rather than failing.
fn parse_segment(segment: &str) -> (&str, Option<usize>) {
    match segment.split_once('[') {
        Some((name, rest)) => {
            let index = rest
                .split_once(']')
                .and_then(|(digits, _)| digits.parse().ok());
            (name, index)
        }
        None => (segment, None),
    }
}

/// Apply an optional index to an array's elements: all of them for the
/// wildcard, the single element (if present) otherwise.
fn select<'a>(items: &'a [Node], index: Option<usize>) -> Vec<&'a Node> {
    match index {
        None => items.iter().collect(),
        Some(i) => items.get(i).into_iter().collect(),
    }
}

impl Node {
    /// Resolve a path to every matching node. Unresolvable paths yield an
    /// empty vector.
    pub fn get_nodes(&self, path: &str) -> Vec<&Node> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let (name, index) = parse_segment(head);
        if name.is_empty() {
            return Vec::new();
        }

        if let Node::Object(map) = self {
            return match map.get(name) {
                Some(child) => descend(child, index, rest),
                None => Vec::new(),
            };
        }

        // No object map here: probe array elements' maps for the segment.
        if let Node::Array(items) = self {
            for element in items {
                if let Node::Object(map) = element {
                    if let Some(child) = map.get(name) {
                        return descend(child, index, rest);
                    }
                }
            }
        }

        Vec::new()
    }

    /// First node resolved by `path` that is not null, or a shared empty
    /// node — never a dangling reference.
    pub fn get_node(&self, path: &str) -> &Node {
        match self.get_nodes(path).first() {
            Some(node) if node.kind() != crate::node::NodeKind::Null => node,
            _ => &EMPTY_NODE,
        }
    }

    /// Walk dot segments through object maps and return every property of
    /// the final object node. Any unresolved segment, or a final node that
    /// is not an object, yields an empty map. Bracket indexes are not part
    /// of this operation's path syntax.
    pub fn get_all_nodes(&self, path: &str) -> HashMap<&str, &Node> {
        let mut current = self;
        for segment in path.split('.') {
            match current.as_object().and_then(|map| map.get(segment)) {
                Some(child) => current = child,
                None => return HashMap::new(),
            }
        }
        match current.as_object() {
            Some(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            None => HashMap::new(),
        }
    }

    /// Scalar text at `path`. The path `"."` names this node itself; an
    /// empty path yields an empty string.
    pub fn get_value(&self, path: &str) -> &str {
        match path {
            "." => self.scalar_text(),
            "" => "",
            _ => self.get_node(path).scalar_text(),
        }
    }

    /// Scalar text at `path` parsed as a float; `0.0` when absent or not
    /// numeric. Coercion is best-effort by design and never errors.
    pub fn get_value_f64(&self, path: &str) -> f64 {
        self.get_value(path).parse().unwrap_or(0.0)
    }

    /// Scalar text at `path` parsed as a number and truncated to an integer;
    /// `0` when absent or not numeric.
    pub fn get_value_i64(&self, path: &str) -> i64 {
        self.get_value_f64(path) as i64
    }
}

/// Continue resolution below a matched child: terminal segments expand
/// arrays per the index, intermediate segments recurse — through the indexed
/// element for indexed arrays, through the child itself otherwise (which
/// probes when the child is an array).
fn descend<'a>(child: &'a Node, index: Option<usize>, rest: Option<&str>) -> Vec<&'a Node> {
    match rest {
        None => match child {
            Node::Array(items) => select(items, index),
            _ => vec![child],
        },
        Some(rest) => match (child, index) {
            (Node::Array(items), Some(i)) => match items.get(i) {
                Some(element) => element.get_nodes(rest),
                None => Vec::new(),
            },
            _ => child.get_nodes(rest),
        },
    }
}
