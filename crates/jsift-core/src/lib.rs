//! # jsift-core
//!
//! Selective, streaming JSON parser: point it at one property name (the
//! **loop property**) and it scans the byte stream once, skips everything
//! around that property with minimal materialization, and emits each value
//! found there — or each element of it, if the value is an array — as an
//! individual result. Memory use is bounded by the matched subtree, not the
//! document, which is the whole point for multi-gigabyte inputs.
//!
//! ## Quick start
//!
//! ```rust
//! use jsift_core::JsonScanner;
//!
//! let doc = br#"{"total":2,"rows":[{"name":"Ada","score":90},{"name":"Bo","score":85}]}"#;
//!
//! // Batch: one synchronous call, each array element is its own result.
//! let mut scanner = JsonScanner::new(&doc[..], "rows");
//! let results = scanner.parse();
//! assert_eq!(results.len(), 2);
//!
//! let first = results[0].as_ref().unwrap();
//! assert_eq!(first.get_value("name"), "Ada");
//! assert_eq!(first.get_value_i64("score"), 90);
//! ```
//!
//! Streaming mode runs the scan on a producer thread and hands results
//! through a bounded channel:
//!
//! ```rust
//! use jsift_core::JsonScanner;
//!
//! let doc = br#"{"rows":[{"name":"Ada"},{"name":"Bo"}]}"#.to_vec();
//! let rx = JsonScanner::new(std::io::Cursor::new(doc), "rows").stream();
//! for item in rx {
//!     let node = item.expect("well-formed document");
//!     assert!(!node.get_value("name").is_empty());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`scanner`] — the scan driver: [`JsonScanner`], batch and streaming sinks
//! - [`node`] — the [`Node`] tree representation and [`NodeKind`] tags
//! - `path` — dotted/indexed navigation (`get_node`, `get_value`, ...) on [`Node`]
//! - [`error`] — the single-condition [`ScanError`] and result aliases
//!
//! Skipped properties (see [`JsonScanner::skip_properties`]) are parsed but
//! never materialized; errors anywhere on the scan path surface as exactly
//! one `Err` item after which the scan stops.

mod builder;
mod cursor;
pub mod error;
mod lexer;
pub mod node;
mod path;
mod scratch;
pub mod scanner;

pub use error::{NodeResult, Result, ScanError};
pub use node::{Node, NodeKind};
pub use scanner::{JsonScanner, ResultReceiver};
