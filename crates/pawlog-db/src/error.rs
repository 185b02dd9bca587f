//! Error types for storage operations.

use thiserror::Error;

/// Errors that can occur while talking to the local store.
#[derive(Debug, Error)]
pub enum Error {
    /// The store could not be opened or written (disabled, locked, full).
    /// Callers retry a write once before surfacing this.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A persisted record could not be decoded. Produced at row
    /// conversion; collection loads warn and skip the row instead of
    /// failing the whole collection.
    #[error("Malformed stored data: {0}")]
    Malformed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
