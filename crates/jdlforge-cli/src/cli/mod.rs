//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "jdlforge",
    bin_name = "jdlforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build, validate and merge JDL domain models",
    long_about = "jdlforge builds JDL documents (applications, entities, enums, \
                  relationships and options) from JSON or TOML descriptions, \
                  validates them, merges several into one and renders JDL text.",
    after_help = "EXAMPLES:\n\
        \x20 jdlforge print model.toml\n\
        \x20 jdlforge validate model.json --strict\n\
        \x20 jdlforge merge base.toml extra.toml -o app.jdl\n\
        \x20 jdlforge export ./my-app\n\
        \x20 jdlforge completions bash > /usr/share/bash-completion/completions/jdlforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a document and print it as JDL.
    #[command(
        visible_alias = "p",
        about = "Print a document as JDL",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge print model.toml\n\
            \x20 jdlforge print model.json --output-format json"
    )]
    Print(PrintArgs),

    /// Check relationships and cross references.
    #[command(
        visible_alias = "check",
        about = "Validate a document",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge validate model.toml\n\
            \x20 jdlforge validate model.toml --strict"
    )]
    Validate(ValidateArgs),

    /// Merge documents left to right.
    #[command(
        about = "Merge documents into one",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge merge base.toml extra.toml\n\
            \x20 jdlforge merge a.json b.json c.json -o app.jdl --force"
    )]
    Merge(MergeArgs),

    /// Convert a generator config directory to JDL.
    #[command(
        about = "Export .jhipster entity files as JDL",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge export\n\
            \x20 jdlforge export ../my-app -o my-app.jdl"
    )]
    Export(ExportArgs),

    /// Initialise a jdlforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge init\n\
            \x20 jdlforge init --force\n\
            \x20 jdlforge --config ./jdlforge.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 jdlforge completions bash > ~/.local/share/bash-completion/completions/jdlforge\n\
            \x20 jdlforge completions zsh  > ~/.zfunc/_jdlforge\n\
            \x20 jdlforge completions fish > ~/.config/fish/completions/jdlforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the jdlforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 jdlforge config get validation.strict\n\
            \x20 jdlforge config list\n\
            \x20 jdlforge config path"
    )]
    Config(ConfigCommands),
}

// ── print ─────────────────────────────────────────────────────────────────────

/// Arguments for `jdlforge print`.
#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Document to build (`.json` or `.toml`).
    #[arg(value_name = "FILE", help = "Document file (.json or .toml)")]
    pub file: PathBuf,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `jdlforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document to validate.
    #[arg(value_name = "FILE", help = "Document file (.json or .toml)")]
    pub file: PathBuf,

    /// Fail on relationship repairs and consistency issues too.
    #[arg(
        long = "strict",
        help = "Treat repairs and consistency issues as errors"
    )]
    pub strict: bool,
}

// ── merge ─────────────────────────────────────────────────────────────────────

/// Arguments for `jdlforge merge`.
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Documents to merge; later ones win on collisions.
    #[arg(
        value_name = "FILE",
        num_args = 2..,
        required = true,
        help = "Documents to merge, left to right"
    )]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub write: WriteArgs,
}

// ── export ────────────────────────────────────────────────────────────────────

/// Arguments for `jdlforge export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project root containing `.yo-rc.json` and the entity directory.
    #[arg(
        value_name = "DIR",
        default_value = ".",
        help = "Project directory (default: current directory)"
    )]
    pub dir: PathBuf,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Where rendered JDL goes.
#[derive(Debug, Default, Args)]
pub struct WriteArgs {
    /// Write to a file instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUT",
        help = "Write JDL to OUT instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite OUT without asking.
    #[arg(short = 'f', long = "force", help = "Overwrite an existing output file")]
    pub force: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `jdlforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `jdlforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `jdlforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.application_type`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from(["jdlforge", "validate", "model.toml", "--strict"]);
        match cli.command {
            Commands::Validate(args) => {
                assert!(args.strict);
                assert_eq!(args.file, PathBuf::from("model.toml"));
            }
            other => panic!("expected Validate, got {other:?}"),
        }
    }

    #[test]
    fn merge_needs_two_files() {
        assert!(Cli::try_parse_from(["jdlforge", "merge", "only.toml"]).is_err());

        let cli = Cli::parse_from(["jdlforge", "merge", "a.toml", "b.json", "-o", "out.jdl"]);
        match cli.command {
            Commands::Merge(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.write.output, Some(PathBuf::from("out.jdl")));
                assert!(!args.write.force);
            }
            other => panic!("expected Merge, got {other:?}"),
        }
    }

    #[test]
    fn export_defaults_to_current_dir() {
        let cli = Cli::parse_from(["jdlforge", "export"]);
        match cli.command {
            Commands::Export(args) => assert_eq!(args.dir, PathBuf::from(".")),
            other => panic!("expected Export, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "jdlforge",
            "print",
            "m.toml",
            "-vv",
            "--log-file",
            "run.log",
        ]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["jdlforge", "--quiet", "--verbose", "print", "m.toml"]);
        assert!(result.is_err());
    }
}
