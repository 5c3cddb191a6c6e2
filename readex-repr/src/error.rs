//! Error types for the representation crate

use std::io;
use thiserror::Error;

/// Result type alias for repr operations
pub type ReprResult<T> = Result<T, ReprError>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum ReprError {
    /// I/O error during read/write
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Version mismatch
    #[error("Version mismatch: expected {expected}, got {actual}")]
    Version { expected: u16, actual: u16 },

    /// Structurally invalid tree document
    #[error("Invalid tree document: {0}")]
    InvalidDocument(String),
}

impl ReprError {
    /// Create an invalid document error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDocument(message.into())
    }
}
