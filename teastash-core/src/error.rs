//! Error types for teastash-core

use thiserror::Error;

/// Main error type for the teastash-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote store error (transport, HTTP status, or GraphQL errors payload)
    #[error("remote store error: {0}")]
    Remote(String),

    /// Collection index out of range
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for teastash-core
pub type Result<T> = std::result::Result<T, Error>;
