//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the [`PatchPlan`]
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by [`AppConfig::plan`] at the call-site)
//! 2. Environment variables, `PBXPATCH_` prefix with `__` between levels
//!    (`PBXPATCH_PATCH__GROUP=Views`, `PBXPATCH_PATCH__FILES=A.swift,B.swift`)
//! 3. `--config FILE`, or else `./pbxpatch.toml` over the per-user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pbxpatch_core::domain::{
    DuplicatePolicy, GroupSpec, ObjectId, ObjectRef, PatchPlan,
    entities::{
        DEFAULT_FILES, DEFAULT_GROUP_NAME, DEFAULT_PARENT_GROUP, DEFAULT_PARENT_GROUP_ID,
        DEFAULT_SIBLING, DEFAULT_SIBLING_ID, DEFAULT_SOURCES_PHASE, DEFAULT_SOURCES_PHASE_ID,
    },
};
use pbxpatch_core::error::PatchError;

use crate::cli::PlanArgs;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pbxpatch.toml";
pub const ENV_PREFIX: &str = "PBXPATCH";
pub const DEFAULT_MANIFEST: &str = "Reversi.xcodeproj/project.pbxproj";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Manifest patched when none is given on the command line.
    pub manifest: PathBuf,
    /// What to add and where.
    pub patch: PatchConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchConfig {
    pub files: Vec<String>,
    pub group: String,
    pub group_path: Option<String>,
    pub parent: String,
    pub parent_id: Option<String>,
    pub sibling: String,
    pub sibling_id: Option<String>,
    pub sources_phase: String,
    pub sources_phase_id: Option<String>,
    pub skip_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            patch: PatchConfig {
                files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
                group: DEFAULT_GROUP_NAME.into(),
                group_path: None,
                parent: DEFAULT_PARENT_GROUP.into(),
                parent_id: Some(DEFAULT_PARENT_GROUP_ID.into()),
                sibling: DEFAULT_SIBLING.into(),
                sibling_id: Some(DEFAULT_SIBLING_ID.into()),
                sources_phase: DEFAULT_SOURCES_PHASE.into(),
                sources_phase_id: Some(DEFAULT_SOURCES_PHASE_ID.into()),
                skip_existing: false,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering files and environment over the defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; when given it
    /// must exist, and the implicit file lookups are skipped.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to seed configuration defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                let user = Self::config_path();
                debug!(user = %user.display(), local = LOCAL_CONFIG_FILE, "Looking for config files");
                builder = builder
                    .add_source(File::from(user.as_path()).required(false))
                    .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("patch.files")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./pbxpatch.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "pbxpatch", "pbxpatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Build the patch plan: configuration values overridden by CLI flags.
    pub fn plan(&self, overrides: &PlanArgs) -> Result<PatchPlan, PatchError> {
        let patch = &self.patch;

        let files = if overrides.files.is_empty() {
            &patch.files
        } else {
            &overrides.files
        };

        let group_name = overrides.group.as_ref().unwrap_or(&patch.group);
        // A group renamed on the command line takes its own name as path
        // unless a path is also given there.
        let group_path = overrides.group_path.as_ref().or(if overrides.group.is_some() {
            None
        } else {
            patch.group_path.as_ref()
        });
        let mut group = GroupSpec::new(group_name.clone());
        if let Some(path) = group_path {
            group = group.with_path(path.clone());
        }

        let parent = anchor(
            overrides.parent.as_ref(),
            overrides.parent_id.as_ref(),
            &patch.parent,
            patch.parent_id.as_ref(),
        )?;
        let sibling = anchor(
            overrides.sibling.as_ref(),
            overrides.sibling_id.as_ref(),
            &patch.sibling,
            patch.sibling_id.as_ref(),
        )?;
        let sources_phase = anchor(
            overrides.sources_phase.as_ref(),
            overrides.sources_phase_id.as_ref(),
            &patch.sources_phase,
            patch.sources_phase_id.as_ref(),
        )?;

        let duplicates = if overrides.skip_existing || patch.skip_existing {
            DuplicatePolicy::Skip
        } else {
            DuplicatePolicy::Append
        };

        let plan = PatchPlan::builder()
            .files(files.iter().cloned())
            .group(group)
            .parent_group(parent)
            .sibling(sibling)
            .sources_phase(sources_phase)
            .duplicates(duplicates)
            .build()?;
        Ok(plan)
    }
}

/// Resolve one anchor.
///
/// A name given on the command line without an id drops the configured id,
/// since that id belongs to the configured name; the anchor is then resolved
/// by name in the manifest.
fn anchor(
    cli_name: Option<&String>,
    cli_id: Option<&String>,
    config_name: &str,
    config_id: Option<&String>,
) -> Result<ObjectRef, PatchError> {
    let name = cli_name.map_or(config_name, String::as_str);
    let id = match (cli_name, cli_id) {
        (_, Some(id)) => Some(id),
        (Some(_), None) => None,
        (None, None) => config_id,
    };

    let mut anchor = ObjectRef::named(name);
    if let Some(id) = id.filter(|id| !id.trim().is_empty()) {
        anchor = anchor.with_id(ObjectId::parse(id.trim().to_ascii_uppercase())?);
    }
    Ok(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reproduces_default_plan() {
        let plan = AppConfig::default().plan(&PlanArgs::default()).unwrap();
        assert_eq!(plan, PatchPlan::default());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "manifest = \"App.xcodeproj/project.pbxproj\"\n\n[patch]\ngroup = \"Views\"\nfiles = [\"A.swift\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.manifest, PathBuf::from("App.xcodeproj/project.pbxproj"));
        assert_eq!(cfg.patch.group, "Views");
        assert_eq!(cfg.patch.files, vec!["A.swift".to_string()]);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.patch.sibling, DEFAULT_SIBLING);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn cli_files_replace_configured_files() {
        let overrides = PlanArgs {
            files: vec!["Only.swift".into()],
            ..Default::default()
        };
        let plan = AppConfig::default().plan(&overrides).unwrap();
        assert_eq!(plan.file_names().collect::<Vec<_>>(), vec!["Only.swift"]);
    }

    #[test]
    fn cli_anchor_name_drops_configured_id() {
        let overrides = PlanArgs {
            sibling: Some("Views".into()),
            ..Default::default()
        };
        let plan = AppConfig::default().plan(&overrides).unwrap();
        assert_eq!(plan.sibling.name, "Views");
        assert!(plan.sibling.id.is_none());
        assert!(plan.parent_group.id.is_some());
    }

    #[test]
    fn lowercase_ids_are_accepted() {
        let overrides = PlanArgs {
            parent_id: Some("d642bdb223a9fe4500396732".into()),
            ..Default::default()
        };
        let plan = AppConfig::default().plan(&overrides).unwrap();
        assert_eq!(
            plan.parent_group.id.unwrap().as_str(),
            DEFAULT_PARENT_GROUP_ID
        );
    }

    #[test]
    fn malformed_id_is_rejected() {
        let overrides = PlanArgs {
            parent_id: Some("XYZ".into()),
            ..Default::default()
        };
        assert!(AppConfig::default().plan(&overrides).is_err());
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let mut config = AppConfig::default();
        config.patch.files.clear();
        assert!(config.plan(&PlanArgs::default()).is_err());
    }

    #[test]
    fn renamed_group_uses_its_own_path() {
        let overrides = PlanArgs {
            group: Some("Views".into()),
            ..Default::default()
        };
        let plan = AppConfig::default().plan(&overrides).unwrap();
        assert_eq!(plan.group.path, "Views");
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
