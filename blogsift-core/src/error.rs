//! Error types for loading items and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading widget inputs
///
/// The filtering, sorting and paging engine itself never fails; only reading
/// files and documents does.
#[derive(Debug, Error)]
pub enum SiftError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The item document parsed but does not hold item records.
    #[error("invalid item list: {0}")]
    InvalidItems(String),
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, SiftError>;
