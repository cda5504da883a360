//! Errors surfaced by the `pbxpatch` binary, their suggestions, and the
//! exit code each one maps to.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use pbxpatch_core::error::PatchError;

pub use pbxpatch_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

/// Everything `main` can report before exiting.
#[derive(Debug, Error)]
pub enum CliError {
    /// `init` found a config file and `--force` was not given.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// `config get` was asked for a key that does not exist.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `pbxpatch-core`.
    #[error("Patch failed: {0}")]
    Core(#[from] PatchError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Next steps printed under the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigExists { path } => vec![
                format!("'{}' is already present", path.display()),
                "Use --force to overwrite it".into(),
                "Or edit the existing file directly".into(),
            ],

            Self::UnknownConfigKey { key } => vec![
                format!("'{}' is not a configuration key", key),
                "Run `pbxpatch config list` to see every key".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check ./pbxpatch.toml and the file shown by `pbxpatch config path`".into(),
                "Use `pbxpatch init` to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::UnknownConfigKey { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Incomplete => ErrorCategory::Incomplete,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Incomplete    |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Incomplete => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Terminal rendering: red headline, dimmed causes, yellow suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same layout as [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if colored { style(&text) } else { text }
        };

        let mut lines = vec![
            String::new(),
            paint(format!("Error: {self}"), |t: &str| t.red().bold().to_string()),
        ];

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                lines.push(paint(format!("  Caused by: {err}"), |t: &str| t.dimmed().to_string()));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:".into(), |t: &str| t.yellow().bold().to_string()));
            lines.extend(suggestions.into_iter().map(|s| format!("  {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint(
                "Use -v / --verbose for more details.".into(),
                |t: &str| t.dimmed().to_string(),
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Emit one event; configuration and internal failures log at ERROR.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, "{self}")
            }
            _ => tracing::warn!(?category, "{self}"),
        }

        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// What kind of failure a [`CliError`] is, from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, an invalid plan, or a refused overwrite.
    UserError,
    NotFound,
    Configuration,
    /// Anchors missing under `--strict`.
    Incomplete,
    Internal,
}

/// Lift an I/O or core result into [`CliResult`] with a context message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, PatchError> {
    /// Core errors already name the manifest, so the context is only logged.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            tracing::debug!(context = %f().into(), "Core operation failed");
            CliError::Core(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbxpatch_core::application::ApplicationError;
    use pbxpatch_core::domain::DomainError;
    use std::io;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn config_exists_suggests_force() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("pbxpatch.toml"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn unknown_key_points_at_config_list() {
        let err = CliError::UnknownConfigKey {
            key: "patch.colour".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("config list")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err = CliError::Core(PatchError::Application(
            ApplicationError::ManifestNotFound {
                path: PathBuf::from("x.pbxproj"),
            },
        ));
        assert!(err.suggestions().iter().any(|s| s.contains("x.pbxproj")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        let invalid_id = CliError::Core(PatchError::Domain(DomainError::InvalidPlan(
            "no files to add".into(),
        )));
        assert_eq!(invalid_id.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let err = CliError::Core(PatchError::Application(
            ApplicationError::ManifestNotFound {
                path: PathBuf::from("x"),
            },
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_incomplete() {
        let err = CliError::Core(PatchError::Application(ApplicationError::IncompletePatch {
            missing: vec!["sibling".into()],
        }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { message, .. }) if message == "reading config"));
    }

    #[test]
    fn into_cli_core_error() {
        let result: Result<(), PatchError> = Err(PatchError::Internal {
            message: "boom".into(),
        });
        let cli = result.with_cli_context(|| "patching");
        assert!(matches!(cli, Err(CliError::Core(_))));
    }
}
