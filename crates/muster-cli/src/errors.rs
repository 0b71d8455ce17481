//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use muster_core::MusterError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (model, config)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check failed
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for an error bubbling out of a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    use super::constants::exit_codes;
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<MusterError>() {
        Some(MusterError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(MusterError::InvalidDate(_))
        | Some(MusterError::InvalidInput { .. })
        | Some(MusterError::Validation(_)) => exit_codes::INVALID_INPUT,
        Some(MusterError::Store(_)) | None => exit_codes::FAILURE,
    }
}

/// Hint to print under a core error, if one helps.
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<MusterError>()? {
        MusterError::NotFound(_) => {
            Some("Hint: Run `muster list` to find model IDs.".to_string())
        }
        MusterError::InvalidInput { field, .. } if field.ends_with("_date") => Some(format!(
            "Hint: Dates must be YYYY-MM-DD (check --{}).",
            field.replace('_', "-")
        )),
        _ => None,
    }
}
