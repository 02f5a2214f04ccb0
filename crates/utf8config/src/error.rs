//! Error types for loading, dumping and editing utf8config documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while decoding, encoding or manipulating a config.
#[derive(Error, Debug)]
pub enum Utf8ConfigError {
    /// A field key is not a valid identifier.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// A section name cannot be written as a `[name]` header.
    #[error("Invalid section name: {0:?}")]
    InvalidSectionName(String),

    /// The text is structurally malformed.
    /// `line` is 1-based; 0 means the position is not known.
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Duplicate section: {0}")]
    DuplicateSection(String),

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Missing section: {0}")]
    MissingSection(String),

    /// A list mixes scalar kinds, or a value cannot be written as text.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Utf8ConfigError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Utf8ConfigError::Format {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout utf8config.
pub type Result<T> = std::result::Result<T, Utf8ConfigError>;
