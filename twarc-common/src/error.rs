//! Common error types for twarc

use thiserror::Error;

use crate::archive::ArchiveError;

/// Common result type for twarc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across twarc crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive date string did not match any known format
    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive file could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}
