//! Error types for featherweight-core
//!
//! Analysis itself is total: empty text and empty histories produce empty or
//! neutral results. Only loading history exports and configuration can fail.

use thiserror::Error;

/// Main error type for the featherweight-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (history exports)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for featherweight-core
pub type Result<T> = std::result::Result<T, Error>;
