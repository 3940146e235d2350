//! Common error types for Agent Map

use thiserror::Error;

/// Common result type for Agent Map operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Agent Map tools
///
/// Only the I/O boundary produces these. Filtering and sorting never fail.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog document could not be parsed (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or command parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
