//! File-backed document source.
//!
//! Reads a [`JdlDocument`] from `.json` or `.toml`, chosen by extension.
//!
//! ```toml
//! [[entities]]
//! name = "Book"
//!
//! [[entities.fields]]
//! name = "title"
//! type = "String"
//! validations = [{ name = "required" }]
//!
//! [[relationships]]
//! type = "ManyToOne"
//! from = "Book"
//! to = "Author"
//! injectedFieldInFrom = "author"
//! ```

use std::{fs, path::Path};

use tracing::{debug, instrument};

use jdlforge_core::{
    application::{ApplicationError, dto::JdlDocument, ports::DocumentSource},
    error::JdlResult,
};

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Production [`DocumentSource`] reading from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentSource;

impl FileDocumentSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw` as `format`. `path` is only used in error messages.
    pub fn parse(raw: &str, format: DocumentFormat, path: &Path) -> JdlResult<JdlDocument> {
        let parsed = match format {
            DocumentFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| {
            ApplicationError::DocumentParse {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }
}

impl DocumentSource for FileDocumentSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> JdlResult<JdlDocument> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            ApplicationError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;

        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::DocumentUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let document = Self::parse(&raw, format, path)?;
        debug!(?format, entities = document.entities.len(), "parsed document");
        Ok(document)
    }
}
