//! Error handling for the jdlforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use jdlforge_core::error::JdlError;

pub use jdlforge_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The output file exists and overwriting was not allowed.
    #[error("Output file already exists: {path}")]
    FileExists { path: PathBuf },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `jdlforge-core` or an adapter.
    #[error("{0}")]
    Core(#[from] JdlError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,
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
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],
            Self::FileExists { path } => vec![
                format!("'{}' already exists", path.display()),
                "Use --force to overwrite it".into(),
                "Or pick another path with -o".into(),
            ],
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Check the file shown by 'jdlforge config path'".into(),
                "Use 'jdlforge init --force' to recreate a default config".into(),
            ],
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::Cancelled => vec!["No changes were made".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::FileExists { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Consistency => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
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
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The error, its causes when `verbose`, and suggestions, with ANSI styling.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut out = format!(
            "\n{} {}\n\n  {}\n",
            "\u{2717}".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );
        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("\n  {} {}\n", "\u{2192}".dimmed(), cause.dimmed()));
            }
        }
        let heading = "Suggestions:".yellow().bold().to_string();
        push_suggestions(&mut out, &self.suggestions(), &heading);
        if !verbose {
            out.push_str(&format!("\n{} {}\n", "\u{2139}".blue(), VERBOSE_HINT.dimmed()));
        }
        out
    }

    /// Same layout as [`Self::format_colored`] without escape codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");
        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
        }
        push_suggestions(&mut out, &self.suggestions(), "Suggestions:");
        if !verbose {
            out.push_str(&format!("\n{VERBOSE_HINT}\n"));
        }
        out
    }

    /// Messages of the `source()` chain, outermost first.
    fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&err| err.source())
            .map(ToString::to_string)
            .collect()
    }

    /// Emit one event at a level matching the category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), error = %self, "command failed")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), error = %self, "command failed")
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "caused by");
        }
    }
}

const VERBOSE_HINT: &str = "Use -v / --verbose for more details.";

fn push_suggestions(out: &mut String, suggestions: &[String], heading: &str) {
    if suggestions.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}\n"));
    for suggestion in suggestions {
        out.push_str(&format!("  {suggestion}\n"));
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign error types into [`CliError`] at call-sites with a
/// descriptive context message.
///
/// Implemented for `Result<T, std::io::Error>` and `Result<T, JdlError>`.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
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
            message: format!("{}: {e}", f().into()),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, JdlError> {
    /// Core errors already name the file or construct they concern, so the
    /// context is only logged.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            tracing::debug!(context = %f().into(), "core operation failed");
            CliError::Core(e)
        })
    }
}
