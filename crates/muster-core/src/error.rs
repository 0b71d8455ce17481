//! Error types for Muster core operations.
//!
//! Errors carry enough context (field name, record id) for the CLI layer to
//! produce an actionable message. Nothing here is retried.

use thiserror::Error;

/// Result type alias for Muster operations.
pub type Result<T> = std::result::Result<T, MusterError>;

/// Core error type for Muster operations.
#[derive(Debug, Error)]
pub enum MusterError {
    /// Malformed date string (expected `YYYY-MM-DD`)
    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A proposed field failed validation during reconciliation
    #[error("Invalid input for field {field}: {source}")]
    InvalidInput {
        field: &'static str,
        #[source]
        source: Box<MusterError>,
    },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record with this id
    #[error("Model {0} not found")]
    NotFound(i64),

    /// Storage backend error (connectivity, constraint violation, I/O)
    #[error("Storage error: {0}")]
    Store(String),
}

impl MusterError {
    /// Wrap a validation failure with the name of the offending field.
    pub fn invalid_input(field: &'static str, source: MusterError) -> Self {
        MusterError::InvalidInput {
            field,
            source: Box::new(source),
        }
    }

    /// A field-level validation failure with a plain message.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::invalid_input(field, MusterError::Validation(message.into()))
    }

    /// Name of the offending field, if this is a validation failure.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            MusterError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for MusterError {
    fn from(err: rusqlite::Error) -> Self {
        MusterError::Store(err.to_string())
    }
}

impl From<std::io::Error> for MusterError {
    fn from(err: std::io::Error) -> Self {
        MusterError::Store(err.to_string())
    }
}
