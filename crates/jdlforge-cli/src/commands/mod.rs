//! Command handlers.
//!
//! Each handler translates its arguments into calls on the core services and
//! reports through [`OutputManager`]. No JDL logic lives here.

pub mod completions;
pub mod config;
pub mod export;
pub mod init;
pub mod merge;
pub mod print;
pub mod validate;

use std::io::IsTerminal as _;
use std::path::Path;

use serde_json::json;
use tracing::{debug, info};

use jdlforge_adapters::FileDocumentSource;
use jdlforge_core::{application::DocumentService, domain::JdlObject};

use crate::{
    cli::WriteArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Document service reading from disk with the configured defaults.
pub(crate) fn document_service(config: &AppConfig) -> DocumentService {
    DocumentService::new(Box::new(FileDocumentSource::new()))
        .with_default_application_type(config.defaults.application_type)
}

/// Counts and names used by `--output-format json`.
pub(crate) fn summary(jdl: &JdlObject) -> serde_json::Value {
    json!({
        "applications": jdl.applications().map(|a| a.base_name()).collect::<Vec<_>>(),
        "entities": jdl.entity_names().collect::<Vec<_>>(),
        "enums": jdl.enum_count(),
        "relationships": jdl.relationship_count(),
        "options": jdl.option_count(),
        "jdl": jdl.to_string(),
    })
}

/// Print the document, or write it to `--output`.
pub(crate) fn emit(jdl: &JdlObject, write: &WriteArgs, output: &OutputManager) -> CliResult<()> {
    let Some(path) = &write.output else {
        if output.is_json() {
            output.json(&summary(jdl))?;
        } else {
            output.document(&jdl.to_string())?;
        }
        return Ok(());
    };

    ensure_writable(path, write.force)?;
    std::fs::write(path, jdl.to_string())
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))?;
    info!(path = %path.display(), "JDL written");

    if output.is_json() {
        output.json(&json!({ "written": path.display().to_string() }))?;
    } else {
        output.success(&format!("Wrote {}", path.display()))?;
    }
    Ok(())
}

/// Refuse to clobber `path` unless forced or confirmed on a terminal.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> CliResult<()> {
    if !path.exists() || force {
        return Ok(());
    }
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        return confirm_overwrite(path);
    }
    debug!(path = %path.display(), "not a terminal, refusing to overwrite");
    Err(CliError::FileExists {
        path: path.to_path_buf(),
    })
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(path: &Path) -> CliResult<()> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {}?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("Could not read confirmation: {e}"),
        })?;
    if confirmed {
        Ok(())
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(path: &Path) -> CliResult<()> {
    Err(CliError::FileExists {
        path: path.to_path_buf(),
    })
}
