//! Application configuration and its per-type factories.
//!
//! # Construction order
//!
//! 1. Universal defaults (`baseName jhipster`, `buildTool maven`, …)
//! 2. Defaults for the application type (ports, client, cache, discovery)
//! 3. Caller overrides
//! 4. Derivations: package name and folder, type-forced settings, and the
//!    authentication secret (`jwtSecretKey` xor `rememberMeKey`)
//!
//! Secrets are generated only when the caller did not supply one.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    validation::ValidationIssue,
    value_objects::{ApplicationType, AuthenticationType},
};

// ── Overrides ─────────────────────────────────────────────────────────────────

/// Caller-supplied settings. Every `None` falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationOverrides {
    pub base_name: Option<String>,
    pub application_type: Option<ApplicationType>,
    pub build_tool: Option<String>,
    pub package_name: Option<String>,
    pub package_folder: Option<String>,
    pub server_port: Option<u16>,
    pub authentication_type: Option<AuthenticationType>,
    pub database_type: Option<String>,
    pub dev_database_type: Option<String>,
    pub prod_database_type: Option<String>,
    pub cache_provider: Option<String>,
    pub client_framework: Option<String>,
    pub use_sass: Option<bool>,
    pub client_package_manager: Option<String>,
    pub skip_client: Option<bool>,
    pub skip_server: Option<bool>,
    pub skip_user_management: Option<bool>,
    pub service_discovery_type: Option<String>,
    pub enable_translation: Option<bool>,
    pub native_language: Option<String>,
    pub languages: Option<Vec<String>>,
    pub jhi_prefix: Option<String>,
    pub search_engine: Option<String>,
    pub message_broker: Option<String>,
    pub test_frameworks: Option<Vec<String>>,
    pub jwt_secret_key: Option<String>,
    pub remember_me_key: Option<String>,
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Fully-resolved generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSettings {
    pub base_name: String,
    pub application_type: ApplicationType,
    pub build_tool: String,
    pub package_name: String,
    pub package_folder: String,
    pub server_port: u16,
    pub authentication_type: AuthenticationType,
    pub database_type: String,
    pub dev_database_type: String,
    pub prod_database_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_sass: Option<bool>,
    pub client_package_manager: String,
    pub skip_client: bool,
    pub skip_server: bool,
    pub skip_user_management: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_discovery_type: Option<String>,
    pub enable_translation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_language: Option<String>,
    pub languages: Vec<String>,
    pub jhi_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_broker: Option<String>,
    pub test_frameworks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jwt_secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me_key: Option<String>,
}

impl ApplicationSettings {
    fn universal_defaults(application_type: ApplicationType) -> Self {
        Self {
            base_name: "jhipster".into(),
            application_type,
            build_tool: "maven".into(),
            package_name: String::new(),
            package_folder: String::new(),
            server_port: 8080,
            authentication_type: AuthenticationType::Jwt,
            database_type: "sql".into(),
            dev_database_type: "h2Disk".into(),
            prod_database_type: "mysql".into(),
            cache_provider: None,
            client_framework: None,
            use_sass: None,
            client_package_manager: "yarn".into(),
            skip_client: false,
            skip_server: false,
            skip_user_management: false,
            service_discovery_type: None,
            enable_translation: true,
            native_language: Some("en".into()),
            languages: vec!["en".into(), "fr".into()],
            jhi_prefix: "jhi".into(),
            search_engine: None,
            message_broker: None,
            test_frameworks: Vec::new(),
            jwt_secret_key: None,
            remember_me_key: None,
        }
    }

    fn with_client(mut self) -> Self {
        self.client_framework = Some("angularX".into());
        self.use_sass = Some(true);
        self.skip_client = false;
        self
    }

    fn apply_type_defaults(mut self) -> Self {
        match self.application_type {
            ApplicationType::Monolith => {
                self = self.with_client();
                self.server_port = 8080;
                self.cache_provider = Some("ehcache".into());
            }
            ApplicationType::Microservice => {
                self.apply_microservice_defaults();
            }
            ApplicationType::Gateway => {
                self.apply_microservice_defaults();
                self = self.with_client();
                self.server_port = 8080;
                self.skip_user_management = false;
            }
            ApplicationType::Uaa => {
                self.apply_microservice_defaults();
                self.server_port = 9999;
                self.skip_user_management = false;
            }
        }
        self
    }

    fn apply_microservice_defaults(&mut self) {
        self.server_port = 8081;
        self.skip_client = true;
        self.skip_user_management = true;
        self.client_framework = None;
        self.use_sass = None;
        self.cache_provider = Some("hazelcast".into());
        self.service_discovery_type = Some("eureka".into());
    }

    fn apply_overrides(&mut self, o: ApplicationOverrides) {
        macro_rules! take {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(v) = o.$field { self.$field = v; })+
            };
        }
        macro_rules! take_opt {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(v) = o.$field { self.$field = Some(v); })+
            };
        }
        take!(
            base_name,
            build_tool,
            package_name,
            package_folder,
            server_port,
            authentication_type,
            database_type,
            dev_database_type,
            prod_database_type,
            client_package_manager,
            skip_client,
            skip_server,
            skip_user_management,
            enable_translation,
            languages,
            jhi_prefix,
            test_frameworks,
        );
        take_opt!(
            cache_provider,
            client_framework,
            use_sass,
            service_discovery_type,
            native_language,
            search_engine,
            message_broker,
            jwt_secret_key,
            remember_me_key,
        );
    }

    fn derive(&mut self) {
        if self.package_name.trim().is_empty() {
            self.package_name = format!("com.mycompany.{}", self.base_name.to_lowercase());
        }
        if self.package_folder.trim().is_empty() {
            self.package_folder = self.package_name.replace('.', "/");
        }

        if self.application_type == ApplicationType::Uaa {
            self.authentication_type = AuthenticationType::Uaa;
            self.skip_client = true;
        }

        // A blank secret counts as no secret.
        self.jwt_secret_key = self.jwt_secret_key.take().filter(|k| !is_blank(k));
        self.remember_me_key = self.remember_me_key.take().filter(|k| !is_blank(k));

        if self.authentication_type == AuthenticationType::Session {
            self.remember_me_key.get_or_insert_with(generate_secret);
            self.jwt_secret_key = None;
        } else if self.uses_jwt() {
            self.jwt_secret_key.get_or_insert_with(generate_secret);
            self.remember_me_key = None;
        }
    }

    fn uses_jwt(&self) -> bool {
        self.authentication_type == AuthenticationType::Jwt
            || self.application_type == ApplicationType::Microservice
    }

    /// `(key, value)` pairs in JDL order. Secrets are never rendered.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("baseName", self.base_name.clone()),
            ("applicationType", self.application_type.to_string()),
            ("authenticationType", self.authentication_type.to_string()),
            ("buildTool", self.build_tool.clone()),
        ];
        if let Some(cache) = &self.cache_provider {
            entries.push(("cacheProvider", cache.clone()));
        }
        if let Some(client) = &self.client_framework {
            entries.push(("clientFramework", client.clone()));
        }
        entries.push(("clientPackageManager", self.client_package_manager.clone()));
        entries.push(("databaseType", self.database_type.clone()));
        entries.push(("devDatabaseType", self.dev_database_type.clone()));
        entries.push(("enableTranslation", self.enable_translation.to_string()));
        entries.push(("jhiPrefix", self.jhi_prefix.clone()));
        entries.push(("languages", format!("[{}]", self.languages.join(", "))));
        if let Some(broker) = &self.message_broker {
            entries.push(("messageBroker", broker.clone()));
        }
        if let Some(lang) = &self.native_language {
            entries.push(("nativeLanguage", lang.clone()));
        }
        entries.push(("packageName", self.package_name.clone()));
        entries.push(("prodDatabaseType", self.prod_database_type.clone()));
        if let Some(search) = &self.search_engine {
            entries.push(("searchEngine", search.clone()));
        }
        entries.push(("serverPort", self.server_port.to_string()));
        if let Some(discovery) = &self.service_discovery_type {
            entries.push(("serviceDiscoveryType", discovery.clone()));
        }
        entries.push(("skipClient", self.skip_client.to_string()));
        entries.push(("skipServer", self.skip_server.to_string()));
        entries.push(("skipUserManagement", self.skip_user_management.to_string()));
        if !self.test_frameworks.is_empty() {
            entries.push((
                "testFrameworks",
                format!("[{}]", self.test_frameworks.join(", ")),
            ));
        }
        if let Some(sass) = self.use_sass {
            entries.push(("useSass", sass.to_string()));
        }
        entries
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn generate_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

// ── ApplicationConfig ─────────────────────────────────────────────────────────

/// One application of a JDL document plus the entities it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfig {
    config: ApplicationSettings,
    entity_names: IndexSet<String>,
}

impl ApplicationConfig {
    /// Build with the application type taken from the overrides (monolith if absent).
    pub fn new(overrides: ApplicationOverrides) -> Self {
        let application_type = overrides.application_type.unwrap_or_default();
        let mut config =
            ApplicationSettings::universal_defaults(application_type).apply_type_defaults();
        config.apply_overrides(ApplicationOverrides {
            application_type: None,
            ..overrides
        });
        config.derive();
        Self {
            config,
            entity_names: IndexSet::new(),
        }
    }

    pub fn monolith(overrides: ApplicationOverrides) -> Self {
        Self::of_type(ApplicationType::Monolith, overrides)
    }

    pub fn microservice(overrides: ApplicationOverrides) -> Self {
        Self::of_type(ApplicationType::Microservice, overrides)
    }

    pub fn gateway(overrides: ApplicationOverrides) -> Self {
        Self::of_type(ApplicationType::Gateway, overrides)
    }

    pub fn uaa(overrides: ApplicationOverrides) -> Self {
        Self::of_type(ApplicationType::Uaa, overrides)
    }

    fn of_type(application_type: ApplicationType, overrides: ApplicationOverrides) -> Self {
        Self::new(ApplicationOverrides {
            application_type: Some(application_type),
            ..overrides
        })
    }

    pub fn config(&self) -> &ApplicationSettings {
        &self.config
    }

    pub fn base_name(&self) -> &str {
        &self.config.base_name
    }

    pub const fn application_type(&self) -> ApplicationType {
        self.config.application_type
    }

    pub fn add_entity_name(&mut self, name: impl Into<String>) -> bool {
        self.entity_names.insert(name.into())
    }

    pub fn add_entity_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity_names.extend(names.into_iter().map(Into::into));
    }

    pub fn with_entity_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_entity_names(names);
        self
    }

    /// Entity names in insertion order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entity_names.iter().map(String::as_str)
    }

    pub fn has_entity_name(&self, name: &str) -> bool {
        self.entity_names.contains(name)
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let c = &self.config;
        let mut issues = Vec::new();
        if c.base_name.trim().is_empty() {
            issues.push(ValidationIssue::NoBaseName);
        }
        if c.package_name.trim().is_empty() {
            issues.push(ValidationIssue::NoPackageName);
        }
        if c.enable_translation && c.native_language.as_deref().is_none_or(|l| l.trim().is_empty()) {
            issues.push(ValidationIssue::NoNativeLanguage);
        }
        if c.authentication_type == AuthenticationType::Session {
            if c.remember_me_key.as_deref().is_none_or(is_blank) {
                issues.push(ValidationIssue::NoRememberMeKey);
            }
        } else if c.uses_jwt() && c.jwt_secret_key.as_deref().is_none_or(is_blank) {
            issues.push(ValidationIssue::NoJwtSecretKey);
        }
        if c.application_type.is_server_only() && !c.skip_client {
            issues.push(ValidationIssue::SkipClientRequired);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl fmt::Display for ApplicationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("application {\n  config {\n")?;
        for (key, value) in self.config.entries() {
            writeln!(f, "    {key} {value}")?;
        }
        f.write_str("  }\n")?;
        if !self.entity_names.is_empty() {
            let names: Vec<&str> = self.entity_names().collect();
            writeln!(f, "  entities {}", names.join(", "))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides() -> ApplicationOverrides {
        ApplicationOverrides::default()
    }

    #[test]
    fn universal_defaults_and_package_derivation() {
        let app = ApplicationConfig::new(ApplicationOverrides {
            base_name: Some("Store".into()),
            ..overrides()
        });
        let c = app.config();
        assert_eq!(c.package_name, "com.mycompany.store");
        assert_eq!(c.package_folder, "com/mycompany/store");
        assert_eq!(c.languages, vec!["en", "fr"]);
        assert_eq!(c.build_tool, "maven");
        assert_eq!(c.application_type, ApplicationType::Monolith);
    }

    #[test]
    fn jwt_generates_secret_and_no_remember_me() {
        let app = ApplicationConfig::monolith(ApplicationOverrides {
            authentication_type: Some(AuthenticationType::Jwt),
            ..overrides()
        });
        let secret = app.config().jwt_secret_key.as_deref().unwrap();
        assert!(!secret.is_empty());
        assert!(app.config().remember_me_key.is_none());
        assert!(app.is_valid());
    }

    #[test]
    fn session_generates_remember_me_only() {
        let app = ApplicationConfig::monolith(ApplicationOverrides {
            authentication_type: Some(AuthenticationType::Session),
            jwt_secret_key: Some("ignored".into()),
            ..overrides()
        });
        assert!(app.config().remember_me_key.is_some());
        assert!(app.config().jwt_secret_key.is_none());
    }

    #[test]
    fn supplied_secret_is_kept() {
        let app = ApplicationConfig::monolith(ApplicationOverrides {
            jwt_secret_key: Some("s3cr3t".into()),
            ..overrides()
        });
        assert_eq!(app.config().jwt_secret_key.as_deref(), Some("s3cr3t"));
    }

    #[test]
    fn blank_secret_is_replaced_by_a_generated_one() {
        let app = ApplicationConfig::monolith(ApplicationOverrides {
            jwt_secret_key: Some(String::new()),
            ..overrides()
        });
        let secret = app.config().jwt_secret_key.as_deref().unwrap();
        assert!(!secret.trim().is_empty());

        let app = ApplicationConfig::monolith(ApplicationOverrides {
            authentication_type: Some(AuthenticationType::Session),
            remember_me_key: Some("   ".into()),
            ..overrides()
        });
        let key = app.config().remember_me_key.as_deref().unwrap();
        assert!(!key.trim().is_empty());
    }

    #[test]
    fn blank_secret_is_invalid() {
        let mut app = ApplicationConfig::monolith(overrides());
        app.config.jwt_secret_key = Some(" ".into());
        assert!(!app.is_valid());
        assert!(app.issues().contains(&ValidationIssue::NoJwtSecretKey));
    }

    #[test]
    fn translation_without_native_language_is_invalid() {
        let app = ApplicationConfig::monolith(ApplicationOverrides {
            native_language: Some(String::new()),
            ..overrides()
        });
        assert_eq!(app.issues(), vec![ValidationIssue::NoNativeLanguage]);
    }

    #[test]
    fn microservice_defaults() {
        let app = ApplicationConfig::microservice(overrides());
        let c = app.config();
        assert!(c.skip_client);
        assert_eq!(c.server_port, 8081);
        assert!(c.client_framework.is_none());
        assert_eq!(c.cache_provider.as_deref(), Some("hazelcast"));
        assert!(c.jwt_secret_key.is_some());
        assert!(app.is_valid());
    }

    #[test]
    fn microservice_with_client_is_invalid() {
        let app = ApplicationConfig::microservice(ApplicationOverrides {
            skip_client: Some(false),
            ..overrides()
        });
        assert_eq!(app.issues(), vec![ValidationIssue::SkipClientRequired]);
    }

    #[test]
    fn gateway_layers_client_on_microservice_defaults() {
        let c = ApplicationConfig::gateway(overrides()).config().clone();
        assert_eq!(c.client_framework.as_deref(), Some("angularX"));
        assert_eq!(c.service_discovery_type.as_deref(), Some("eureka"));
        assert!(!c.skip_client);
        assert_eq!(c.server_port, 8080);
    }

    #[test]
    fn uaa_forces_authentication_and_skip_client() {
        let app = ApplicationConfig::uaa(ApplicationOverrides {
            authentication_type: Some(AuthenticationType::Jwt),
            skip_client: Some(false),
            ..overrides()
        });
        let c = app.config();
        assert_eq!(c.authentication_type, AuthenticationType::Uaa);
        assert!(c.skip_client);
        assert_eq!(c.server_port, 9999);
        assert!(c.jwt_secret_key.is_none());
        assert!(app.is_valid());
    }

    #[test]
    fn entity_names_are_deduplicated_in_order() {
        let mut app = ApplicationConfig::new(overrides()).with_entity_names(["B", "A"]);
        assert!(!app.add_entity_name("B"));
        assert!(app.add_entity_name("C"));
        assert_eq!(app.entity_names().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    }

    #[test]
    fn renders_config_and_entities_without_secrets() {
        let app = ApplicationConfig::new(overrides()).with_entity_names(["A", "B"]);
        let text = app.to_string();
        assert!(text.starts_with("application {\n  config {\n    baseName jhipster\n"));
        assert!(text.contains("    languages [en, fr]\n"));
        assert!(text.ends_with("  }\n  entities A, B\n}"));
        assert!(!text.contains("jwtSecretKey"));
    }

    #[test]
    fn overrides_deserialize_from_camel_case() {
        let o: ApplicationOverrides = serde_json::from_str(
            r#"{"baseName":"shop","applicationType":"gateway","serverPort":9000}"#,
        )
        .unwrap();
        let app = ApplicationConfig::new(o);
        assert_eq!(app.base_name(), "shop");
        assert_eq!(app.application_type(), ApplicationType::Gateway);
        assert_eq!(app.config().server_port, 9000);
    }
}
