//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `pbxpatch apply -v`
//! and `pbxpatch -v apply` mean the same thing.

use std::path::PathBuf;

use clap::{ArgAction, Args};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// More diagnostics on stderr: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors and JSON only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain symbols instead of ANSI colours. Also set by `NO_COLOR`.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read configuration from FILE instead of `./pbxpatch.toml` and the
    /// per-user file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format. `auto` defers to `output.format`, then to the terminal.
    #[arg(
        short = 'o',
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Auto
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Whether error reports should include the full cause chain.
    pub fn verbose_errors(&self) -> bool {
        self.verbose > 0
    }
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Coloured symbols.
    Human,
    /// No escape codes.
    Plain,
    /// `PatchReport` or `ManifestSummary` as pretty JSON.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; unknown values fall back to `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}
