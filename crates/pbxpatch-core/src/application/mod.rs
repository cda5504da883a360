//! Application layer for pbxpatch.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (PatchService, InspectService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! text manipulation itself. All manifest rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AnchorStatus,
    InspectService,
    ManifestSummary, // DTO for inspect output
    PatchOptions,
    PatchService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{IdentifierSource, ManifestStore};

pub use error::ApplicationError;
