//! Error types for Filedeck.

use thiserror::Error;

/// Common error type for Filedeck.
#[derive(Error, Debug)]
pub enum FiledeckError {
    /// Missing, blank or malformed argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Path escapes the managed root, or is not a directory where one is required.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Target already exists where uniqueness is required.
    #[error("{0} already exists")]
    Conflict(String),

    /// Unclassified I/O error from the backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FiledeckError {
    /// Whether the caller can act on this error (as opposed to a store failure).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FiledeckError::Io(_) | FiledeckError::Config(_))
    }
}

/// Result type alias for Filedeck operations.
pub type Result<T> = std::result::Result<T, FiledeckError>;
