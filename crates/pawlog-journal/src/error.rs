//! Error types for pawlog-journal

use thiserror::Error;

/// Journal error type
///
/// Nothing here is fatal to the host: input errors are rejected before
/// any mutation, storage errors surface after one retry.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown export format name
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Invalid input, rejected before any state was touched
    #[error("Invalid input: {0}")]
    Input(#[from] pawlog_core::Error),

    /// Storage error, already retried once
    #[error("Storage error: {0}")]
    Storage(#[from] pawlog_db::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, Error>;
