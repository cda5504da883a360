//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The manifest file does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Strict mode refused to write a partially applied patch.
    #[error("Patch incomplete, {} anchor(s) missing: {}", missing.len(), missing.join(", "))]
    IncompletePatch { missing: Vec<String> },

    /// Store access failed (lock poisoned, etc.).
    #[error("Manifest store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestNotFound { path } => vec![
                format!("No file at: {}", path.display()),
                "Run from the directory containing the .xcodeproj bundle".into(),
                "Or pass the manifest path explicitly: pbxpatch apply <path>".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::IncompletePatch { .. } => vec![
                "Nothing was written because --strict is set".into(),
                "Run `pbxpatch inspect` to see which anchors the manifest contains".into(),
                "Adjust --parent, --sibling or --sources-phase to match".into(),
            ],
            Self::StoreLockError => vec![
                "The manifest store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::IncompletePatch { .. } => ErrorCategory::Incomplete,
        }
    }
}
