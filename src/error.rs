//! Central error types for readex.
//!
//! Rendering itself never fails: unknown nodes, missing members and failed
//! capability probes all degrade to a conservative rendering. Errors only
//! come from the outer surfaces (configuration files and tree documents).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum ReadexError {
    /// Config file could not be read
    #[error("failed to read {path}: {error}")]
    ConfigIo {
        error: std::io::Error,
        path: PathBuf,
    },

    /// Config file is not valid TOML or has unknown keys
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config value outside its valid range
    #[error("invalid config value for '{key}': {message}")]
    InvalidConfig { key: &'static str, message: String },

    /// Tree document could not be decoded
    #[error("tree error: {0}")]
    Repr(#[from] readex_repr::ReprError),
}

/// Convenience type alias for Results using ReadexError.
pub type Result<T> = std::result::Result<T, ReadexError>;
