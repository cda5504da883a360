//! Tracing subscriber setup.
//!
//! `pbxpatch-core` and `pbxpatch-adapters` only emit events; the binary is
//! the one place a subscriber gets installed. Diagnostics go to stderr so
//! that `-o json` output on stdout stays parseable.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! A set `RUST_LOG` replaces the table entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the selected level.
const TARGETS: [&str; 3] = ["pbxpatch", "pbxpatch_core", "pbxpatch_adapters"];

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    let events = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(events)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Level selected by `--quiet` and the `-v` count; quiet wins.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
