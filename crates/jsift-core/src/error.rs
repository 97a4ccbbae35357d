//! Error type for scan failures.

use thiserror::Error;

/// The single error condition surfaced by the scanning engine.
///
/// Input exhaustion, lexical errors (bad escapes, control bytes inside
/// strings, misspelled literals) and structural errors (unexpected bytes where
/// a separator or closing bracket was required) all collapse to
/// [`ScanError::InvalidDocument`]. The engine trades diagnostics for speed: it
/// never resynchronizes after an error, so a more detailed breakdown would
/// describe a position it is about to abandon anyway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The document is malformed somewhere on the scan path, or it ended
    /// before a value, separator, or closing bracket that was still expected.
    #[error("invalid JSON document")]
    InvalidDocument,
}

/// Convenience alias used throughout jsift-core.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Item type delivered by both result sinks.
///
/// A scan yields zero or more `Ok` nodes followed by at most one `Err`; after
/// an `Err` the scan has stopped and no further items arrive.
pub type NodeResult = std::result::Result<crate::node::Node, ScanError>;
