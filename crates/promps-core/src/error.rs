//! Error types for the Promps core

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in the Promps core
///
/// Grammar findings are not errors; they are reported through
/// [`crate::ValidationResult`]. These variants cover parsing of the closed
/// vocabulary and loading of pattern catalogs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A block type string is not part of the vocabulary
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// A locale string is neither Japanese nor English
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A pattern catalog contains no templates
    #[error("Pattern catalog is empty")]
    EmptyCatalog,

    /// Two templates in a catalog share an id
    #[error("Duplicate pattern id: {0}")]
    DuplicatePattern(String),

    /// A template has no blocks
    #[error("Pattern '{0}' has no blocks")]
    EmptyPattern(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an unknown block type error
    pub fn unknown_block(block_type: impl Into<String>) -> Self {
        Self::UnknownBlockType(block_type.into())
    }
}
