//! Implementation of the `pbxpatch inspect` command.

use tracing::instrument;

use pbxpatch_adapters::LocalFilesystem;
use pbxpatch_core::application::InspectService;

use crate::{
    cli::InspectArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Report sections and anchor status for the manifest the plan targets.
#[instrument(skip_all)]
pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = args.manifest.unwrap_or_else(|| config.manifest.clone());
    let plan = config.plan(&args.plan)?;

    let summary = InspectService::new(Box::new(LocalFilesystem::new()))
        .inspect(&manifest, &plan)
        .with_cli_context(|| format!("inspecting {}", manifest.display()))?;

    output.summary(&summary)?;
    Ok(())
}
