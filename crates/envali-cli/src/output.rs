//! Output management and formatting.
//!
//! Status lines (`✓`, `✗`, `⚠`, `ℹ`) are commentary and respect `--quiet`,
//! except failures.  Command results go through [`OutputManager::data`] and
//! [`OutputManager::json`] and are always written.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliError;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Failure,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Failure => "\u{2717}", // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Success => text.green().to_string(),
            Self::Failure => text.red().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
        }
    }
}

/// Writes command output according to the resolved format and flags.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = resolve_format(args.output_format, &config.output.format);
        let color = !(args.no_color || config.output.no_color || format == OutputFormat::Plain);
        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    // ── status lines ──────────────────────────────────────────────────────

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    /// Failure line; written even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Failure, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    /// Section header, bold cyan when colour is on.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&text.cyan().bold().to_string())
        } else {
            self.term.write_line(text)
        }
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet && tone != Tone::Failure {
            return Ok(());
        }
        self.term.write_line(&self.render_status(tone, msg))
    }

    fn render_status(&self, tone: Tone, msg: &str) -> String {
        if self.color {
            format!("{} {}", tone.paint(tone.symbol()).bold(), tone.paint(msg))
        } else {
            format!("{} {msg}", tone.symbol())
        }
    }

    // ── results ───────────────────────────────────────────────────────────

    /// One result line, verbatim.
    pub fn data(&self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    /// Pretty JSON document.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let rendered = serde_json::to_string_pretty(value)?;
        self.term.write_line(&rendered)?;
        Ok(())
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn supports_color(&self) -> bool {
        self.color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Resolve `Auto`: the flag wins, then `output.format` from config, then
/// Human on a TTY and Plain when piped or redirected.
fn resolve_format(flag: OutputFormat, configured: &str) -> OutputFormat {
    let requested = match flag {
        OutputFormat::Auto => OutputFormat::from_config(configured).unwrap_or_default(),
        explicit => explicit,
    };
    match requested {
        OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        resolved => resolved,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
