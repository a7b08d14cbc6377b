//! Error types for host commands

use serde::Serialize;
use thiserror::Error;

/// Result type alias using CommandError
pub type Result<T> = std::result::Result<T, CommandError>;

/// Errors returned by host commands
///
/// Grammar findings and degraded fix plans are normal results; these cover
/// requests the host cannot serve at all.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The pattern catalog failed to load; pattern features are disabled
    #[error("Pattern catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommandError {
    /// Stable identifier for the wire format
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatalogUnavailable(_) => "catalogUnavailable",
            Self::UnknownCommand(_) => "unknownCommand",
            Self::InvalidRequest(_) => "invalidRequest",
            Self::InvalidArguments(_) => "invalidArguments",
            Self::Serialization(_) => "serialization",
        }
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}

/// Error as sent to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl From<&CommandError> for ErrorBody {
    fn from(err: &CommandError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body() {
        let err = CommandError::CatalogUnavailable("missing.json".to_string());
        let body = ErrorBody::from(&err);
        assert_eq!(body.kind, "catalogUnavailable");
        assert_eq!(body.message, "Pattern catalog unavailable: missing.json");

        let err = CommandError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(ErrorBody::from(&err).kind, "serialization");
    }
}
