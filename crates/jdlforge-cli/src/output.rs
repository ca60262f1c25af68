//! Output management and formatting.
//!
//! Status lines (`✓`, `⚠`, `ℹ`) go to stderr so that rendered JDL on stdout
//! can be piped straight into a file.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    out: Term,
    status: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            resolved_format: resolve_format(args.output_format, config, io::stdout().is_terminal()),
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            out: Term::stdout(),
            status: Term::stderr(),
        }
    }

    // ── Data output (stdout, never suppressed) ────────────────────────────

    /// Rendered JDL text.
    pub fn document(&self, text: &str) -> io::Result<()> {
        self.out.write_str(text)?;
        if !text.ends_with('\n') {
            self.out.write_line("")?;
        }
        Ok(())
    }

    /// A JSON value, pretty-printed.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.out.write_line(&text)
    }

    /// Generic line on stdout; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.out.write_line(msg)
    }

    // ── Status output (stderr) ────────────────────────────────────────────

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.status.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.status.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.status.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.status.write_line(&line)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// `--output-format` wins unless it is `auto`; then `output.format` from the
/// config file, with `human` downgraded to `plain` when stdout is piped.
fn resolve_format(flag: OutputFormat, config: &AppConfig, stdout_is_tty: bool) -> OutputFormat {
    if flag != OutputFormat::Auto {
        return flag;
    }
    let configured = config
        .output
        .format
        .parse::<OutputFormat>()
        .unwrap_or_else(|_| {
            warn!(format = %config.output.format, "unknown output.format, using auto");
            OutputFormat::Auto
        });
    match configured {
        OutputFormat::Json | OutputFormat::Plain => configured,
        OutputFormat::Human | OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Human | OutputFormat::Auto => OutputFormat::Plain,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
