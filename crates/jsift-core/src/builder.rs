//! Recursive tree builder for objects and arrays.
//!
//! Descends into one matched value and materializes it as a [`Node`] tree.
//! Properties named in the skip set are consumed but never stored: strings
//! and containers go through the dedicated skip routines, while scalar
//! numbers/booleans/nulls are read normally and simply not recorded (the
//! scalar readers already consume them, so that is the cheapest skip).
//!
//! Recursion depth is bounded only by document nesting; adversarially deep
//! input can exhaust the stack. See DESIGN.md.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use crate::error::{Result, ScanError};
use crate::lexer::{classify, is_ws, Lexer};
use crate::node::{Node, NodeKind};

/// Build an object whose opening `{` was already consumed.
pub(crate) fn build_object<R: BufRead>(
    lex: &mut Lexer<R>,
    skip: &HashSet<String>,
) -> Result<Node> {
    let mut map = HashMap::new();
    loop {
        let b = lex.must_read()?;
        if is_ws(b) {
            continue;
        }
        match b {
            b'"' => {
                // Inside an object a string can only be a property name; if
                // no colon follows, its lookahead byte was pushed back and
                // the value dispatch below picks it up.
                lex.read_property_name()?;
                let prop = lex.scratch_string();
                let skipped = skip.contains(&prop);

                let lead = lex.next_non_ws()?;
                match classify(lead)? {
                    NodeKind::String => {
                        if skipped {
                            lex.skip_string()?;
                        } else {
                            lex.read_string()?;
                            map.insert(prop, Node::String(lex.scratch_string()));
                        }
                    }
                    NodeKind::Array => {
                        if skipped {
                            lex.skip_balanced(b'[', b']')?;
                        } else {
                            map.insert(prop, build_array(lex, skip)?);
                        }
                    }
                    NodeKind::Object => {
                        if skipped {
                            lex.skip_balanced(b'{', b'}')?;
                        } else {
                            map.insert(prop, build_object(lex, skip)?);
                        }
                    }
                    NodeKind::Boolean => {
                        let v = lex.read_boolean(lead)?;
                        if !skipped {
                            map.insert(prop, Node::Boolean(v));
                        }
                    }
                    NodeKind::Number => {
                        lex.read_number(lead)?;
                        if !skipped {
                            map.insert(prop, Node::Number(lex.scratch_string()));
                        }
                    }
                    NodeKind::Null => {
                        lex.read_null()?;
                        if !skipped {
                            map.insert(prop, Node::Null);
                        }
                    }
                }
            }
            b',' => continue,
            b'}' => return Ok(Node::Object(map)),
            _ => return Err(ScanError::InvalidDocument),
        }
    }
}

/// Build an array whose opening `[` was already consumed. The skip set does
/// not apply to elements themselves, only to properties of objects nested
/// below them.
pub(crate) fn build_array<R: BufRead>(
    lex: &mut Lexer<R>,
    skip: &HashSet<String>,
) -> Result<Node> {
    let mut items = Vec::new();
    loop {
        let b = lex.must_read()?;
        if is_ws(b) || b == b',' {
            continue;
        }
        if b == b']' {
            return Ok(Node::Array(items));
        }
        match classify(b)? {
            NodeKind::String => {
                lex.read_string()?;
                items.push(Node::String(lex.scratch_string()));
            }
            NodeKind::Array => items.push(build_array(lex, skip)?),
            NodeKind::Object => items.push(build_object(lex, skip)?),
            NodeKind::Boolean => items.push(Node::Boolean(lex.read_boolean(b)?)),
            NodeKind::Number => {
                lex.read_number(b)?;
                items.push(Node::Number(lex.scratch_string()));
            }
            NodeKind::Null => {
                lex.read_null()?;
                items.push(Node::Null);
            }
        }
    }
}
