//! Patch Service - main application orchestrator.
//!
//! This service coordinates the patch workflow:
//! 1. Read the manifest
//! 2. Run the patcher over its text
//! 3. Write the result back, unless this is a dry run or a refused strict run

use std::path::Path;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{IdentifierSource, ManifestStore},
    },
    domain::{PatchPlan, PatchReport, Patcher},
    error::PatchResult,
};

/// Knobs that change what happens after the text is patched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Compute the report but never write.
    pub dry_run: bool,
    /// Refuse to write unless every anchor was found.
    pub strict: bool,
}

/// Main patch service.
pub struct PatchService {
    store: Box<dyn ManifestStore>,
    ids: Box<dyn IdentifierSource>,
}

impl PatchService {
    /// Create a new patch service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pbxpatch_core::application::{PatchService, ports::*};
    ///
    /// let service = PatchService::new(
    ///     store, // impl ManifestStore
    ///     ids,   // impl IdentifierSource
    /// );
    /// ```
    pub fn new(store: Box<dyn ManifestStore>, ids: Box<dyn IdentifierSource>) -> Self {
        Self { store, ids }
    }

    /// Apply `plan` to the manifest at `path`.
    ///
    /// A missing anchor is reported in the returned [`PatchReport`] and does
    /// not stop the remaining insertions. Reading the manifest is the only
    /// step whose failure leaves nothing to report.
    #[instrument(
        skip_all,
        fields(
            manifest = %path.as_ref().display(),
            group = %plan.group.name,
            dry_run = options.dry_run,
        )
    )]
    pub fn apply(
        &self,
        path: impl AsRef<Path>,
        plan: &PatchPlan,
        options: PatchOptions,
    ) -> PatchResult<PatchReport> {
        let path = path.as_ref();
        info!(files = plan.files.len(), "Patching manifest");

        // 1. Read
        if !self.store.exists(path) {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let original = self.store.read_to_string(path)?;

        // 2. Patch
        let output = Patcher::new(plan).apply(&original, || self.ids.next_id())?;

        let mut report = PatchReport {
            manifest: path.to_path_buf(),
            group_name: plan.group.name.clone(),
            ids: output.ids,
            outcomes: output.outcomes,
            skipped_files: output.skipped_files,
            written: false,
        };

        // 3. Write
        if options.strict && !report.is_complete() {
            let missing: Vec<String> = report
                .missing_anchors()
                .map(|(point, anchor)| format!("{point}: {anchor}"))
                .collect();
            warn!(missing = missing.len(), "Strict mode: refusing to write");
            return Err(ApplicationError::IncompletePatch { missing }.into());
        }

        if options.dry_run {
            info!("Dry run: manifest left unchanged");
            return Ok(report);
        }

        if output.text == original {
            info!("Manifest already up to date");
            return Ok(report);
        }

        self.store.write(path, &output.text)?;
        report.written = true;

        info!(
            applied = report.applied_count(),
            missing = report.missing_anchors().count(),
            "Manifest updated"
        );
        Ok(report)
    }
}
