//! Error types for datsearch
//!
//! Provides a unified error type for all operations.

use std::fmt;
use thiserror::Error;

/// Result type alias using SearchError
pub type Result<T> = std::result::Result<T, SearchError>;

/// Unified error type for datsearch operations
#[derive(Debug, Error)]
pub enum SearchError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: std::io::Error,
    },

    #[error("Timed out while {operation}")]
    Timeout { operation: Operation },

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Short read on {field}: expected {expected} bytes, got {got}")]
    ShortRead {
        field: Field,
        expected: usize,
        got: usize,
    },

    #[error("{field} of {size} bytes exceeds limit of {max} bytes")]
    FieldTooLarge { field: Field, size: usize, max: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// True for failures raised because a deadline elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::Timeout { .. })
    }

    /// True when the stream ended in the middle of a field
    pub fn is_short_read(&self) -> bool {
        matches!(self, SearchError::ShortRead { .. })
    }
}

/// Stream operation that was in progress when a deadline elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Reading,
    Writing,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Reading => f.write_str("reading"),
            Operation::Writing => f.write_str("writing"),
        }
    }
}

/// Wire field being read, reported by decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Record header (data size or end-of-stream sentinel)
    DataSize,
    DataValue,
    NeedleLength,
    Needle,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::DataSize => "data size",
            Field::DataValue => "data value",
            Field::NeedleLength => "needle length",
            Field::Needle => "needle",
        };
        f.write_str(name)
    }
}
