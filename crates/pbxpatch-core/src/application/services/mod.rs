//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "patch a manifest" or "inspect its anchors".

pub mod inspect_service;
pub mod patch_service;

pub use inspect_service::{AnchorStatus, InspectService, ManifestSummary};
pub use patch_service::{PatchOptions, PatchService};
