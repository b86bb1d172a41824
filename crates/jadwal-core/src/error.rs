//! Error types for jadwal-core

use thiserror::Error;

/// Main error type for jadwal-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for jadwal-core
pub type Result<T> = std::result::Result<T, Error>;
