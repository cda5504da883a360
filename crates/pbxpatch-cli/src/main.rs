//! # pbxpatch
//!
//! Registers source files and a group in an Xcode `project.pbxproj`.
//!
//! `main` loads `.env`, parses arguments, installs the subscriber, loads
//! [`AppConfig`], and hands the subcommand to its handler. Every failure
//! after parsing is a [`CliError`], rendered once in [`report_failure`].
//!
//! ## Exit codes
//!
//! | Code | Meaning                              |
//! |------|--------------------------------------|
//! |  0   | Success, including partial patches   |
//! |  1   | Internal or I/O error                |
//! |  2   | Bad arguments or an invalid plan     |
//! |  3   | Manifest not found                   |
//! |  4   | Configuration could not be loaded    |
//! |  5   | `--strict` and an anchor was missing |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Optional; the process environment still applies without it.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here, on stdout with code 0.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("{e}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose_errors();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err, verbose),
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;
    debug!(manifest = %config.manifest.display(), "Configuration loaded");

    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::Apply(args) => commands::apply::execute(args, config, output),
        Commands::Inspect(args) => commands::inspect::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log `err`, print it with suggestions on stderr, and pick the exit code.
fn report_failure(err: &CliError, verbose: bool) -> ExitCode {
    err.log();

    let rendered = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{rendered}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_comes_from_the_manifest() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn every_subcommand_is_reachable() {
        let names: Vec<_> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        for name in ["apply", "inspect", "init", "completions", "config"] {
            assert!(names.iter().any(|n| n == name), "{name}");
        }
    }
}
