//! Argument surface of the `pbxpatch` binary.
//!
//! Flags only describe overrides; merging them with the configuration happens
//! in [`crate::config::AppConfig::plan`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// `pbxpatch [GLOBAL] <COMMAND>`.
#[derive(Debug, Parser)]
#[command(
    name    = "pbxpatch",
    bin_name = "pbxpatch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Register source files and a group in an Xcode project manifest",
    long_about = "pbxpatch adds build-file, file-reference, group and sources-phase \
                  entries to a project.pbxproj by targeted text insertion. \
                  Everything it does not touch is preserved byte for byte.",
    after_help = "EXAMPLES:\n\
        \x20 pbxpatch apply\n\
        \x20 pbxpatch apply MyApp.xcodeproj/project.pbxproj -f LoginView.swift -f LoginModel.swift --group Login\n\
        \x20 pbxpatch apply --skip-existing --strict\n\
        \x20 pbxpatch inspect\n\
        \x20 pbxpatch completions bash > /usr/share/bash-completion/completions/pbxpatch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Patch a manifest.
    #[command(
        visible_alias = "a",
        about = "Add files and a group to a manifest",
        after_help = "EXAMPLES:\n\
            \x20 pbxpatch apply                                   # configured defaults\n\
            \x20 pbxpatch apply --dry-run -o json                 # preview identifiers\n\
            \x20 pbxpatch apply -f Chart.swift --group Charts --sibling Models"
    )]
    Apply(ApplyArgs),

    /// Report sections and anchor status without writing.
    #[command(
        visible_alias = "i",
        about = "Inspect a manifest",
        after_help = "EXAMPLES:\n\
            \x20 pbxpatch inspect\n\
            \x20 pbxpatch inspect MyApp.xcodeproj/project.pbxproj --parent MyApp"
    )]
    Inspect(InspectArgs),

    /// Initialise a pbxpatch configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 pbxpatch init           # ./pbxpatch.toml\n\
            \x20 pbxpatch init --global  # per-user config"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pbxpatch completions bash > ~/.local/share/bash-completion/completions/pbxpatch\n\
            \x20 pbxpatch completions zsh  > ~/.zfunc/_pbxpatch\n\
            \x20 pbxpatch completions fish > ~/.config/fish/completions/pbxpatch.fish"
    )]
    Completions(CompletionsArgs),

    /// Show the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 pbxpatch config get patch.group\n\
            \x20 pbxpatch config list\n\
            \x20 pbxpatch config path"
    )]
    Config(ConfigCommands),
}

// ── plan overrides ────────────────────────────────────────────────────────────

/// Flags that override the configured patch plan.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// File to register. Repeat for several files; replaces the configured list.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "NAME",
        help = "File to add (repeatable)"
    )]
    pub files: Vec<String>,

    /// Name of the group created for the files.
    #[arg(short = 'g', long = "group", value_name = "NAME", help = "Group name")]
    pub group: Option<String>,

    /// On-disk path of the group, relative to its parent. Defaults to the name.
    #[arg(long = "group-path", value_name = "PATH", help = "Group path")]
    pub group_path: Option<String>,

    #[arg(long = "parent", value_name = "NAME", help = "Parent group name")]
    pub parent: Option<String>,

    #[arg(long = "parent-id", value_name = "ID", help = "Parent group identifier")]
    pub parent_id: Option<String>,

    #[arg(
        long = "sibling",
        value_name = "NAME",
        help = "Existing child the group is placed before"
    )]
    pub sibling: Option<String>,

    #[arg(long = "sibling-id", value_name = "ID", help = "Sibling identifier")]
    pub sibling_id: Option<String>,

    #[arg(long = "sources-phase", value_name = "NAME", help = "Sources build phase name")]
    pub sources_phase: Option<String>,

    #[arg(
        long = "sources-phase-id",
        value_name = "ID",
        help = "Sources build phase identifier"
    )]
    pub sources_phase_id: Option<String>,

    /// Skip files the manifest already references and reuse an existing group.
    #[arg(long = "skip-existing", help = "Skip entries that already exist")]
    pub skip_existing: bool,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `pbxpatch apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Manifest to patch. Defaults to the configured `manifest`.
    #[arg(value_name = "MANIFEST", help = "Path to project.pbxproj")]
    pub manifest: Option<PathBuf>,

    #[command(flatten)]
    pub plan: PlanArgs,

    /// Compute and print the result without writing.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,

    /// Refuse to write unless every anchor was found.
    #[arg(long = "strict", help = "Fail (exit 5) if any anchor is missing")]
    pub strict: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `pbxpatch inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[arg(value_name = "MANIFEST", help = "Path to project.pbxproj")]
    pub manifest: Option<PathBuf>,

    #[command(flatten)]
    pub plan: PlanArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `pbxpatch init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the per-user config location instead of `./pbxpatch.toml`.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pbxpatch completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `pbxpatch config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `patch.group`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the per-user configuration file.
    Path,
}
