//! Error types for the compatibility checker

use thiserror::Error;

/// Result type for compatibility operations
pub type Result<T> = std::result::Result<T, CompatError>;

/// Compatibility checker errors
#[derive(Error, Debug)]
pub enum CompatError {
    #[error("failed to read schema file {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse schema file {path}: {source}")]
    ParseFile {
        path: String,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the schema is not backward compatible:\n{0}")]
    Incompatible(String),
}
