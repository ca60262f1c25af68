//! `jdlforge config`: inspect configuration values.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.document(&value)?;
        }
        ConfigCommands::List => {
            if output.is_json() {
                let value = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.json(&value)?;
            } else {
                let rendered = config.to_toml().map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(e.into()),
                })?;
                output.document(&rendered)?;
            }
        }
        ConfigCommands::Path => {
            let path = global.config.clone().unwrap_or_else(AppConfig::config_path);
            output.document(&path.display().to_string())?;
        }
    }

    Ok(())
}

/// Scalars print bare; sections print as JSON.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(value) => Ok(value.to_string()),
        None => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
