// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for pbxpatch.
//!
//! Pure text logic: the patch plan, the manifest scan, fragment rendering and
//! the patcher itself. Reading and writing manifests and drawing random
//! identifiers happen behind ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: the patcher works on `&str` and returns a `String`
//! - **Injected randomness**: identifiers come from a caller-supplied closure
//! - **Immutable inputs**: plans are Clone + PartialEq and never mutated by the patcher
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod fragments;
pub mod identifiers;
pub mod patcher;
pub mod pbxproj;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    DuplicatePolicy, FileIds, GeneratedIds, GroupSpec, InsertionOutcome, InsertionPoint,
    ObjectRef, PatchPlan, PatchPlanBuilder, PatchReport, SourceFile,
};

pub use error::{DomainError, ErrorCategory};

pub use identifiers::IdAllocator;
pub use patcher::{PatchOutput, Patcher};
pub use pbxproj::{ManifestScan, ObjectLookup, Section};
pub use value_objects::{FileType, OBJECT_ID_LEN, ObjectId};

pub use validation::DomainValidator;
