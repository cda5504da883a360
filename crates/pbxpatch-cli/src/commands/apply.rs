//! `pbxpatch apply`: resolve the plan, patch the manifest, print the report.

use tracing::{debug, info, instrument};

use pbxpatch_adapters::{LocalFilesystem, UuidIdentifierSource};
use pbxpatch_core::application::{PatchOptions, PatchService};

use crate::{
    cli::ApplyArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// The manifest argument wins over `manifest` in the configuration.
#[instrument(skip_all)]
pub fn execute(args: ApplyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = args.manifest.unwrap_or_else(|| config.manifest.clone());
    let plan = config.plan(&args.plan)?;

    debug!(
        manifest = %manifest.display(),
        files = plan.files.len(),
        group = %plan.group.name,
        duplicates = ?plan.duplicates,
        "Plan resolved"
    );

    let service = PatchService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(UuidIdentifierSource::new()),
    );
    let options = PatchOptions {
        dry_run: args.dry_run,
        strict: args.strict,
    };

    let report = service
        .apply(&manifest, &plan, options)
        .with_cli_context(|| format!("patching {}", manifest.display()))?;

    info!(
        written = report.written,
        applied = report.applied_count(),
        complete = report.is_complete(),
        "Patch finished"
    );

    output.report(&report, args.dry_run)?;
    Ok(())
}
