//! Core of `pbxpatch`: registers Swift files and a group in an Xcode
//! `project.pbxproj` by inserting text at known anchors.
//!
//! - [`domain`] holds the plan, identifiers, manifest scanner and the
//!   [`Patcher`](domain::Patcher). It does no I/O and draws no randomness.
//! - [`application`] wires the domain to two driven ports,
//!   [`ManifestStore`](application::ports::ManifestStore) and
//!   [`IdentifierSource`](application::ports::IdentifierSource), through
//!   `PatchService` and `InspectService`.
//! - `pbxpatch-adapters` implements the ports; `pbxpatch-cli` drives the
//!   services.
//!
//! ```rust,ignore
//! use pbxpatch_core::prelude::*;
//!
//! let service = PatchService::new(store, ids);
//! let report = service.apply(
//!     "Reversi.xcodeproj/project.pbxproj",
//!     &PatchPlan::default(),
//!     PatchOptions::default(),
//! )?;
//! assert!(report.is_complete());
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        InspectService, ManifestSummary, PatchOptions, PatchService,
        ports::{IdentifierSource, ManifestStore},
    };
    pub use crate::domain::{
        DuplicatePolicy, GroupSpec, InsertionOutcome, InsertionPoint, ObjectId, ObjectRef,
        PatchPlan, PatchReport, SourceFile,
    };
    pub use crate::error::{PatchError, PatchResult};
}

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
