//! Rendering of reports and summaries on stdout, as styled text or JSON.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use pbxpatch_core::application::ManifestSummary;
use pbxpatch_core::domain::PatchReport;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// How a rendered line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Success,
    Info,
    Warning,
    Plain,
}

impl Tone {
    fn glyph(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("\u{2713}"),
            Self::Info => Some("\u{2139}"),
            Self::Warning => Some("\u{26a0}"),
            Self::Header | Self::Plain => None,
        }
    }

    fn paint(self, glyph: Option<&str>, msg: &str) -> String {
        let body = match self {
            Self::Header => msg.cyan().bold().to_string(),
            Self::Success => msg.green().to_string(),
            Self::Info => msg.blue().to_string(),
            Self::Warning => msg.yellow().to_string(),
            Self::Plain => msg.to_owned(),
        };
        match glyph {
            Some(glyph) => format!("{} {body}", glyph.bold()),
            None => body,
        }
    }
}

/// Resolved output settings plus the stdout handle.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over `output.format`; Auto resolves to Human on a TTY
        // and Plain when piped.
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    /// Write one line, prefixed with the glyph for `tone`. Nothing is
    /// written in quiet mode.
    pub fn line(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let text = match (tone.glyph(), self.no_color) {
            (None, true) => msg.to_owned(),
            (Some(glyph), true) => format!("{glyph} {msg}"),
            (glyph, false) => tone.paint(glyph, msg),
        };
        self.term.write_line(&text)
    }

    /// Pretty-printed JSON on stdout. Printed in quiet mode too, since
    /// scripts ask for it explicitly.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Write pre-rendered lines with their tones.
    pub fn lines(&self, lines: &[(Tone, String)]) -> io::Result<()> {
        lines
            .iter()
            .try_for_each(|(tone, text)| self.line(*tone, text))
    }

    /// Print the result of an `apply` run in the resolved format.
    pub fn report(&self, report: &PatchReport, dry_run: bool) -> io::Result<()> {
        match self.resolved_format {
            OutputFormat::Json => self.json(report),
            _ => self.lines(&report_lines(report, dry_run)),
        }
    }

    /// Print the result of an `inspect` run in the resolved format.
    pub fn summary(&self, summary: &ManifestSummary) -> io::Result<()> {
        match self.resolved_format {
            OutputFormat::Json => self.json(summary),
            _ => self.lines(&summary_lines(summary)),
        }
    }
}

// ── rendering ─────────────────────────────────────────────────────────────────

/// Lines describing an `apply` run.
pub fn report_lines(report: &PatchReport, dry_run: bool) -> Vec<(Tone, String)> {
    let manifest = report.manifest.display();
    let mut lines = Vec::new();

    if report.written {
        lines.push((Tone::Success, format!("Successfully added files to {manifest}")));
    } else if !report.changed() && !report.is_complete() {
        lines.push((
            Tone::Warning,
            format!("No section of {manifest} was patched"),
        ));
    } else if dry_run {
        lines.push((Tone::Info, format!("Dry run: {manifest} was not modified")));
    } else {
        lines.push((Tone::Info, format!("{manifest} is already up to date")));
    }

    if report.changed() {
        lines.push((Tone::Header, "Generated identifiers:".into()));
        for file in &report.ids.files {
            lines.push((
                Tone::Plain,
                format!(
                    "  {}: FileRef={}, BuildFile={}",
                    file.name, file.file_ref, file.build_file
                ),
            ));
        }
        if let Some(group) = &report.ids.group {
            lines.push((
                Tone::Plain,
                format!("  {} Group: {group}", report.group_name),
            ));
        }
    }

    if !report.skipped_files.is_empty() {
        lines.push((
            Tone::Info,
            format!(
                "Skipped {} file(s) already in the manifest: {}",
                report.skipped_files.len(),
                report.skipped_files.join(", ")
            ),
        ));
    }

    for (point, anchor) in report.missing_anchors() {
        lines.push((
            Tone::Warning,
            format!("{point} left unchanged: {anchor} not found"),
        ));
    }

    lines
}

/// Lines describing an `inspect` run.
pub fn summary_lines(summary: &ManifestSummary) -> Vec<(Tone, String)> {
    let mut lines = vec![(
        Tone::Header,
        format!("Manifest: {}", summary.manifest.display()),
    )];

    lines.push((Tone::Header, "Sections:".into()));
    for section in &summary.sections {
        lines.push((
            Tone::Plain,
            format!("  {} ({} objects)", section.name, section.object_count),
        ));
    }

    lines.push((Tone::Header, "Anchors:".into()));
    for anchor in &summary.anchors {
        let id = anchor
            .id
            .as_deref()
            .map(|id| format!(" {id}"))
            .unwrap_or_default();
        let text = format!("{}: {}{id} ({})", anchor.role, anchor.name, anchor.detail);
        lines.push((if anchor.found { Tone::Success } else { Tone::Warning }, text));
    }

    if summary.present_files.is_empty() {
        lines.push((Tone::Info, "None of the files are referenced yet".into()));
    } else {
        lines.push((
            Tone::Info,
            format!("Already referenced: {}", summary.present_files.join(", ")),
        ));
    }
    lines.push((
        Tone::Info,
        if summary.group_present {
            "Group already exists".to_string()
        } else {
            "Group does not exist yet".to_string()
        },
    ));

    lines
}

// ── tests ─────────────────────────────────────────────────────────────────────
