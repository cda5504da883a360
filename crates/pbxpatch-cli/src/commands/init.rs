//! `pbxpatch init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, Tone},
};

/// Create a default configuration file in the working directory, or in the
/// per-user location with `--global`.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = if args.global {
        AppConfig::config_path()
    } else {
        PathBuf::from(LOCAL_CONFIG_FILE)
    };

    output.line(Tone::Info, "Initialising configuration...")?;
    write_default(&path, args.force)?;
    output.line(Tone::Success, &format!("Configuration created at {}", path.display()))?;
    Ok(())
}

/// Write the default configuration to `path`.
fn write_default(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pbxpatch.toml");

        write_default(&path, false).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(loaded.manifest, defaults.manifest);
        assert_eq!(loaded.patch.files, defaults.patch.files);
        assert_eq!(loaded.patch.parent_id, defaults.patch.parent_id);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pbxpatch.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let err = write_default(&path, false).unwrap_err();
        assert!(matches!(err, CliError::ConfigExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[patch]"));
    }
}
