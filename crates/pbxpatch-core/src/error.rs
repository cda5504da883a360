//! [`PatchError`], the one error type the public API returns.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Domain and application failures, plus bugs.
#[derive(Debug, Error, Clone)]
pub enum PatchError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A broken invariant inside the crate.
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PatchError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in pbxpatch".into(),
                "Please report this issue with the command you ran".into(),
            ],
        }
    }

    /// Collapses the layer-specific categories into one.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Drives the binary's exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// Some anchors were missing and strict mode refused to write.
    Incomplete,
    Internal,
}

pub type PatchResult<T> = Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn categories_flow_through_layers() {
        let err: PatchError = DomainError::InvalidPlan("empty".into()).into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: PatchError = ApplicationError::ManifestNotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err: PatchError = ApplicationError::IncompletePatch { missing: vec![] }.into();
        assert_eq!(err.category(), ErrorCategory::Incomplete);
    }

    #[test]
    fn internal_errors_ask_for_a_report() {
        let err = PatchError::Internal {
            message: "group id collided".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("This is a bug"));
        assert!(err.suggestions().iter().any(|s| s.contains("report")));
    }
}
