//! `pbxpatch config`: show the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Tone},
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.line(Tone::Plain, &value)?;
        }

        ConfigCommands::List => {
            output.line(Tone::Header, "Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.line(Tone::Plain, serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.line(Tone::Plain, &AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let patch = &config.patch;
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    match key {
        "manifest" => Ok(config.manifest.display().to_string()),
        "patch.files" => Ok(patch.files.join(",")),
        "patch.group" => Ok(patch.group.clone()),
        "patch.group_path" => Ok(patch
            .group_path
            .clone()
            .unwrap_or_else(|| patch.group.clone())),
        "patch.parent" => Ok(patch.parent.clone()),
        "patch.parent_id" => Ok(optional(&patch.parent_id)),
        "patch.sibling" => Ok(patch.sibling.clone()),
        "patch.sibling_id" => Ok(optional(&patch.sibling_id)),
        "patch.sources_phase" => Ok(patch.sources_phase.clone()),
        "patch.sources_phase_id" => Ok(optional(&patch.sources_phase_id)),
        "patch.skip_existing" => Ok(patch.skip_existing.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::UnknownConfigKey {
            key: key.to_string(),
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
