//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pbxpatch-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::ObjectId;
use crate::error::PatchResult;

/// Port for reading and writing the project manifest.
///
/// Implemented by:
/// - `pbxpatch_adapters::filesystem::LocalFilesystem` (production)
/// - `pbxpatch_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ManifestStore: Send + Sync {
    /// Read the whole manifest as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> PatchResult<String>;

    /// Replace the manifest with `content`.
    fn write(&self, path: &Path, content: &str) -> PatchResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for drawing fresh object identifiers.
///
/// Implemented by:
/// - `pbxpatch_adapters::identifiers::UuidIdentifierSource` (random, production)
/// - `pbxpatch_adapters::identifiers::SequentialIdentifierSource` (deterministic, testing)
///
/// Sources need not check for collisions; the patcher redraws on conflict.
#[cfg_attr(test, mockall::automock)]
pub trait IdentifierSource: Send + Sync {
    fn next_id(&self) -> ObjectId;
}
