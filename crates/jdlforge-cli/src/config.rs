//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `JDLFORGE__<SECTION>__<KEY>`,
//!    e.g. `JDLFORGE__VALIDATION__STRICT=true`
//! 3. Config file (`--config`, else the per-user file from [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use jdlforge_core::domain::ApplicationType;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "JDLFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values applied when a document leaves them out.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Validation behaviour.
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Application type for documents whose application omits one.
    pub application_type: ApplicationType,
    /// Entity directory read by `export`, relative to the project root.
    pub config_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            application_type: ApplicationType::default(),
            config_dir: PathBuf::from(jdlforge_adapters::config_store::ENTITY_DIR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human`, `plain` or `json`; used when `--output-format` is `auto`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Treat relationship repairs and consistency issues as errors.
    pub strict: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the per-user file is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.jdlforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "jdlforge", "jdlforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".jdlforge.toml"))
    }

    /// Look up a dotted key such as `validation.strict`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut node = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            node = node.get_mut(part)?.take();
        }
        Some(node)
    }

    /// Render as a TOML document.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
