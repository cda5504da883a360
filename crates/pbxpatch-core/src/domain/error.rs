// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid object identifier '{value}': {reason}")]
    InvalidObjectId { value: String, reason: &'static str },

    #[error("Invalid patch plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: &'static str },

    #[error("Duplicate file in patch plan: {name}")]
    DuplicateFile { name: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Resource Errors
    // ========================================================================
    #[error("Could not allocate a unique identifier after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: usize },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidObjectId { value, .. } => vec![
                format!("'{}' is not a valid object identifier", value),
                "Identifiers are exactly 24 uppercase hexadecimal characters".into(),
                "Example: D642BDB223A9FE4500396732".into(),
            ],
            Self::InvalidFileName { name, reason } => vec![
                format!("File name '{}' cannot be used: {}", name, reason),
                "Pass plain file names such as GameView.swift".into(),
            ],
            Self::DuplicateFile { name } => vec![
                format!("'{}' is listed more than once", name),
                "Remove the duplicate --file argument or config entry".into(),
            ],
            Self::InvalidPlan(msg) => vec![
                "Check the patch section of your configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::IdentifierSpaceExhausted { .. } => vec![
                "The identifier source kept producing identifiers already in use".into(),
                "This is likely a bug in the identifier source".into(),
            ],
            _ => vec!["See `pbxpatch --help` for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidObjectId { .. }
            | Self::InvalidPlan(_)
            | Self::InvalidFileName { .. }
            | Self::DuplicateFile { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::IdentifierSpaceExhausted { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
