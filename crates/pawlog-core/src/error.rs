//! Error types for pawlog-core

use thiserror::Error;

/// Input validation errors, raised before any state is touched
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown button name (only "yes" and "no" exist)
    #[error("Unknown button type: {0}")]
    UnknownButton(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
