//! Scan driver and result sinks.
//!
//! The driver walks the document linearly, hunting for the configured loop
//! property among the object keys it passes. On a match it dispatches on the
//! value's type: scalars and objects are emitted as one result each, while an
//! array enters array-loop mode and emits every element as its own result.
//! Memory use stays bounded by the matched subtree, never the whole document.
//!
//! Two sinks share the identical driver: batch mode accumulates results into
//! a list returned after the scan, streaming mode hands them through a
//! bounded channel fed by a producer thread.

use std::collections::HashSet;
use std::io::BufRead;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::builder::{build_array, build_object};
use crate::error::NodeResult;
use crate::lexer::{classify, Lexer};
use crate::node::{Node, NodeKind};

/// Capacity of the streaming result channel. A full channel blocks the
/// producer until the consumer drains it.
const RESULT_QUEUE_CAPACITY: usize = 256;

/// Selective streaming parser for one input stream.
///
/// A scanner is configured once — loop property and optional skip set — and
/// runs exactly one scan, either synchronously ([`parse`](Self::parse)) or on
/// a producer thread ([`stream`](Self::stream)).
///
/// ```
/// use jsift_core::JsonScanner;
///
/// let doc = br#"{"size":2,"items":[{"id":1},{"id":2}]}"# as &[u8];
/// let results = JsonScanner::new(doc, "items").parse();
/// assert_eq!(results.len(), 2);
/// let first = results[0].as_ref().unwrap();
/// assert_eq!(first.get_value("id"), "1");
/// ```
pub struct JsonScanner<R> {
    lexer: Lexer<R>,
    loop_prop: String,
    skip_props: HashSet<String>,
}

enum Sink {
    Batch(Vec<NodeResult>),
    Stream(Sender<NodeResult>),
}

impl Sink {
    /// Deliver one result. Returns false when the streaming consumer is gone
    /// and the scan should stop.
    fn send(&mut self, item: NodeResult) -> bool {
        match self {
            Sink::Batch(list) => {
                list.push(item);
                true
            }
            Sink::Stream(tx) => tx.send(item).is_ok(),
        }
    }
}

impl<R: BufRead> JsonScanner<R> {
    /// Create a scanner that hunts for `loop_property` in the bytes of
    /// `reader`.
    pub fn new(reader: R, loop_property: impl Into<String>) -> Self {
        Self {
            lexer: Lexer::new(reader),
            loop_prop: loop_property.into(),
            skip_props: HashSet::new(),
        }
    }

    /// Property names whose values are parsed but discarded wherever they
    /// occur inside a materialized subtree.
    pub fn skip_properties<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_props.extend(props.into_iter().map(Into::into));
        self
    }

    /// Bytes accepted from the underlying reader so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.lexer.bytes_consumed()
    }

    /// Run the scan synchronously and return all results. After an error the
    /// list ends with exactly one `Err` item; earlier matches stay usable.
    pub fn parse(&mut self) -> Vec<NodeResult> {
        let mut sink = Sink::Batch(Vec::new());
        self.run(&mut sink);
        match sink {
            Sink::Batch(list) => list,
            Sink::Stream(_) => unreachable!(),
        }
    }

    /// Run the scan on a producer thread, delivering results through a
    /// bounded channel in document order. The channel closes after the last
    /// result (or the single error). Dropping the receiver early stops the
    /// producer at its next send.
    pub fn stream(mut self) -> Receiver<NodeResult>
    where
        R: Send + 'static,
    {
        let (tx, rx) = bounded(RESULT_QUEUE_CAPACITY);
        thread::spawn(move || {
            let mut sink = Sink::Stream(tx);
            self.run(&mut sink);
        });
        rx
    }

    /// The hunting loop. Plain end of input here is a clean stop; everything
    /// past a detected property name goes through the lexer, whose errors are
    /// emitted once and end the scan.
    fn run(&mut self, sink: &mut Sink) {
        loop {
            let b = match self.lexer.try_read() {
                Ok(b) => b,
                Err(_) => return,
            };
            if b != b'"' {
                // Whitespace and structural bytes outside any targeted value
                // are left to balance themselves; the engine does not
                // validate them.
                continue;
            }

            let is_prop = match self.lexer.read_property_name() {
                Ok(v) => v,
                Err(e) => {
                    sink.send(Err(e));
                    return;
                }
            };
            if !is_prop {
                continue;
            }

            if !self.dispatch_property(sink) {
                return;
            }
        }
    }

    /// Handle one detected property: classify its value, then either emit
    /// (loop property), skip (string value), or fall back to the ambient
    /// loop. Returns false when the scan must stop.
    fn dispatch_property(&mut self, sink: &mut Sink) -> bool {
        let lead = match self.lexer.next_non_ws() {
            Ok(b) => b,
            Err(e) => {
                sink.send(Err(e));
                return false;
            }
        };
        // Classified before the name comparison, so an unrecognized lead
        // byte fails the scan even under an irrelevant property.
        let kind = match classify(lead) {
            Ok(k) => k,
            Err(e) => {
                sink.send(Err(e));
                return false;
            }
        };

        if self.lexer.scratch_bytes() != self.loop_prop.as_bytes() {
            // Only string values are actively skipped at hunting level;
            // other value types re-enter the ambient loop byte by byte.
            if kind == NodeKind::String {
                if let Err(e) = self.lexer.skip_string() {
                    sink.send(Err(e));
                    return false;
                }
            }
            return true;
        }

        match kind {
            NodeKind::String => match self.lexer.read_string() {
                Ok(()) => sink.send(Ok(Node::String(self.lexer.scratch_string()))),
                Err(e) => {
                    sink.send(Err(e));
                    false
                }
            },
            NodeKind::Number => match self.lexer.read_number(lead) {
                Ok(()) => sink.send(Ok(Node::Number(self.lexer.scratch_string()))),
                Err(e) => {
                    sink.send(Err(e));
                    false
                }
            },
            NodeKind::Boolean => match self.lexer.read_boolean(lead) {
                Ok(v) => sink.send(Ok(Node::Boolean(v))),
                Err(e) => {
                    sink.send(Err(e));
                    false
                }
            },
            NodeKind::Null => match self.lexer.read_null() {
                Ok(()) => sink.send(Ok(Node::Null)),
                Err(e) => {
                    sink.send(Err(e));
                    false
                }
            },
            NodeKind::Object => match build_object(&mut self.lexer, &self.skip_props) {
                Ok(node) => sink.send(Ok(node)),
                Err(e) => {
                    sink.send(Err(e));
                    false
                }
            },
            NodeKind::Array => self.loop_array(sink),
        }
    }

    /// Array-loop mode: the loop property's value is an array, and every
    /// element becomes its own result, in source order. A failed element is
    /// terminal — one `Err` is emitted and iteration stops.
    fn loop_array(&mut self, sink: &mut Sink) -> bool {
        loop {
            let b = match self.lexer.next_non_ws() {
                Ok(b) => b,
                Err(e) => {
                    sink.send(Err(e));
                    return false;
                }
            };
            if b == b']' {
                return true;
            }
            if b == b',' {
                continue;
            }

            let item = classify(b).and_then(|kind| match kind {
                NodeKind::String => {
                    self.lexer.read_string()?;
                    Ok(Node::String(self.lexer.scratch_string()))
                }
                NodeKind::Number => {
                    self.lexer.read_number(b)?;
                    Ok(Node::Number(self.lexer.scratch_string()))
                }
                NodeKind::Boolean => Ok(Node::Boolean(self.lexer.read_boolean(b)?)),
                NodeKind::Null => {
                    self.lexer.read_null()?;
                    Ok(Node::Null)
                }
                NodeKind::Object => build_object(&mut self.lexer, &self.skip_props),
                NodeKind::Array => build_array(&mut self.lexer, &self.skip_props),
            });

            match item {
                Ok(node) => {
                    if !sink.send(Ok(node)) {
                        return false;
                    }
                }
                Err(e) => {
                    sink.send(Err(e));
                    return false;
                }
            }
        }
    }
}

// Lets downstream code name the streaming handle without importing the
// crossbeam crate directly.
pub use crossbeam_channel::Receiver as ResultReceiver;
