//! Infrastructure adapters for pbxpatch.
//!
//! This crate implements the ports defined in `pbxpatch-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod identifiers;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use identifiers::{SequentialIdentifierSource, UuidIdentifierSource};
