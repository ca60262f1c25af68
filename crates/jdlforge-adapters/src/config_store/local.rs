//! Generator config store on the local filesystem.
//!
//! # Directory layout expected
//!
//! ```text
//! project/
//! ├── .yo-rc.json              ← { "generator-jhipster": { ...settings } }
//! └── .jhipster/
//!     ├── Author.json
//!     └── Book.json
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use jdlforge_core::{
    application::{ApplicationError, dto::EntityDefinition, ports::EntityConfigStore},
    domain::ApplicationOverrides,
    error::JdlResult,
};

/// Directory holding one JSON file per entity.
pub const ENTITY_DIR: &str = ".jhipster";
/// Application settings file.
pub const YO_RC_FILE: &str = ".yo-rc.json";
/// Key of the generator's section inside [`YO_RC_FILE`].
pub const GENERATOR_KEY: &str = "generator-jhipster";

/// Settings the generator writes as `false` when the feature is disabled.
const OPTIONAL_STRING_KEYS: &[&str] = &[
    "cacheProvider",
    "clientFramework",
    "searchEngine",
    "messageBroker",
    "serviceDiscoveryType",
];

/// Reads `.jhipster/*.json` and `.yo-rc.json` under a project root.
#[derive(Debug, Clone)]
pub struct LocalEntityConfigStore {
    root: PathBuf,
    entity_dir: PathBuf,
}

impl LocalEntityConfigStore {
    /// The root does not need to exist; a missing `.jhipster/` means no entities.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entity_dir: PathBuf::from(ENTITY_DIR),
        }
    }

    /// Read entity files from `dir` (relative to the root) instead of `.jhipster`.
    pub fn with_entity_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entity_dir = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entity_dir(&self) -> PathBuf {
        self.root.join(&self.entity_dir)
    }

    fn read_entity(path: &Path) -> Result<EntityDefinition, String> {
        let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut definition: EntityDefinition =
            serde_json::from_str(&raw).map_err(|e| e.to_string())?;
        if definition.name.is_empty() {
            definition.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
        }
        Ok(definition)
    }
}

impl EntityConfigStore for LocalEntityConfigStore {
    /// Unreadable or malformed entity files are skipped with a warning.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list_entities(&self) -> JdlResult<Vec<EntityDefinition>> {
        let dir = self.entity_dir();
        if !dir.is_dir() {
            debug!("no entity directory");
            return Ok(Vec::new());
        }

        let mut definitions = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ApplicationError::StoreUnreadable {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }

            match Self::read_entity(path) {
                Ok(definition) => {
                    debug!(entity = %definition.name, "loaded entity definition");
                    definitions.push(definition);
                }
                Err(error) => {
                    warn!(
                        file  = %path.display(),
                        %error,
                        "skipping entity file due to load error"
                    );
                }
            }
        }

        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(definitions)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn application(&self) -> JdlResult<Option<ApplicationOverrides>> {
        let path = self.root.join(YO_RC_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let unreadable = |reason: String| ApplicationError::StoreUnreadable {
            path: path.clone(),
            reason,
        };
        let raw = fs::read_to_string(&path).map_err(|e| unreadable(e.to_string()))?;
        let mut root: Value = serde_json::from_str(&raw).map_err(|e| unreadable(e.to_string()))?;

        let Some(section) = root.get_mut(GENERATOR_KEY) else {
            debug!("no generator section");
            return Ok(None);
        };
        normalize_settings(section);
        let overrides: ApplicationOverrides =
            serde_json::from_value(section.take()).map_err(|e| unreadable(e.to_string()))?;
        Ok(Some(overrides))
    }
}

/// Coerce the generator's loose JSON into the shape [`ApplicationOverrides`] expects.
///
/// `false` stands for "disabled" on string settings and `serverPort` may be
/// written as a string.
pub(crate) fn normalize_settings(section: &mut Value) {
    let Some(map) = section.as_object_mut() else {
        return;
    };
    for key in OPTIONAL_STRING_KEYS {
        if map.get(*key) == Some(&Value::Bool(false)) {
            map.remove(*key);
        }
    }
    if let Some(port) = map
        .get("serverPort")
        .and_then(Value::as_str)
        .map(str::to_owned)
    {
        match port.trim().parse::<u16>() {
            Ok(port) => {
                map.insert("serverPort".into(), port.into());
            }
            Err(_) => {
                warn!(%port, "ignoring non-numeric serverPort");
                map.remove("serverPort");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdlforge_core::domain::{ApplicationType, AuthenticationType};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let full = root.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    #[test]
    fn missing_directory_means_no_entities() {
        let temp = TempDir::new().unwrap();
        let store = LocalEntityConfigStore::new(temp.path());
        assert!(store.list_entities().unwrap().is_empty());
        assert!(store.application().unwrap().is_none());
    }

    #[test]
    fn entities_are_sorted_and_named_from_file_stem() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            ".jhipster/Book.json",
            r#"{ "fields": [{ "fieldName": "title", "fieldType": "String" }], "dto": "mapstruct" }"#,
        );
        write(
            temp.path(),
            ".jhipster/Author.json",
            r#"{ "relationships": [{ "relationshipType": "one-to-many", "relationshipName": "book", "otherEntityName": "book" }] }"#,
        );
        write(temp.path(), ".jhipster/notes.txt", "ignored");

        let store = LocalEntityConfigStore::new(temp.path());
        let entities = store.list_entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Author");
        assert_eq!(entities[1].name, "Book");
        assert_eq!(entities[1].dto.as_deref(), Some("mapstruct"));
        assert_eq!(entities[0].relationships[0].other_entity_name, "book");
    }

    #[test]
    fn entity_dir_can_be_renamed() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "model/Book.json", "{}");

        let store = LocalEntityConfigStore::new(temp.path());
        assert!(store.list_entities().unwrap().is_empty());

        let store = store.with_entity_dir("model");
        assert_eq!(store.list_entities().unwrap()[0].name, "Book");
    }

    #[test]
    fn malformed_entity_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".jhipster/Good.json", "{}");
        write(temp.path(), ".jhipster/Bad.json", "{ nope");

        let store = LocalEntityConfigStore::new(temp.path());
        let entities = store.list_entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "Good");
    }

    #[test]
    fn application_settings_are_normalized() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            YO_RC_FILE,
            r#"{ "generator-jhipster": {
                "baseName": "store",
                "applicationType": "gateway",
                "authenticationType": "jwt",
                "serverPort": "8081",
                "searchEngine": false,
                "jhipsterVersion": "5.0.0"
            } }"#,
        );

        let overrides = LocalEntityConfigStore::new(temp.path())
            .application()
            .unwrap()
            .unwrap();
        assert_eq!(overrides.base_name.as_deref(), Some("store"));
        assert_eq!(overrides.application_type, Some(ApplicationType::Gateway));
        assert_eq!(overrides.authentication_type, Some(AuthenticationType::Jwt));
        assert_eq!(overrides.server_port, Some(8081));
        assert_eq!(overrides.search_engine, None);
    }

    #[test]
    fn yo_rc_without_generator_section_has_no_application() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), YO_RC_FILE, r#"{ "other-generator": {} }"#);
        assert!(
            LocalEntityConfigStore::new(temp.path())
                .application()
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn malformed_yo_rc_is_an_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), YO_RC_FILE, "{");
        assert!(LocalEntityConfigStore::new(temp.path()).application().is_err());
    }

    #[test]
    fn non_numeric_port_is_dropped() {
        let mut value = serde_json::json!({ "serverPort": "http", "messageBroker": false });
        normalize_settings(&mut value);
        assert_eq!(value, serde_json::json!({}));
    }
}
