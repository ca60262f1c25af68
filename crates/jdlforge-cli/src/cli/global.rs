//! Flags accepted by every `jdlforge` subcommand.
//!
//! Flattened into [`super::Cli`] and marked `global`, so `jdlforge merge a b -vv`
//! and `jdlforge -vv merge a b` mean the same thing.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log level: warn by default, then info, debug, trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v info, -vv debug, -vvv trace)",
        long_help = "Raise the log level written to stderr:
    (none)  warnings and errors
    -v      documents built, merged and repaired
    -vv     deduplicated relationships, unioned option scopes
    -vvv    everything
RUST_LOG, when set, replaces this filter entirely."
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain status lines. Also set by a non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Never emit ANSI colour codes"
    )]
    pub no_color: bool,

    /// Explicit config file; it must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the per-user config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are written to stdout"
    )]
    pub output_format: OutputFormat,

    /// Appended to, never truncated. No ANSI codes.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Also write logs to FILE"
    )]
    pub log_file: Option<PathBuf>,
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the config, then terminal detection.
    #[default]
    Auto,
    /// Coloured status lines.
    Human,
    /// No colour, for pipes.
    Plain,
    /// One JSON document on stdout.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    /// Case-insensitive, for the `output.format` config value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
