//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `jdlforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DocumentSource`: reading construction-parameter documents
//!   - `EntityConfigStore`: reading the generator's per-entity config files
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

use std::path::Path;

use crate::application::dto::{EntityDefinition, JdlDocument};
use crate::domain::ApplicationOverrides;
use crate::error::JdlResult;

/// Port for loading a JDL document's construction parameters.
///
/// Implemented by:
/// - `jdlforge_adapters::FileDocumentSource` (`.json` / `.toml` files)
#[cfg_attr(test, mockall::automock)]
pub trait DocumentSource: Send + Sync {
    /// Load and parse the document at `path`.
    fn load(&self, path: &Path) -> JdlResult<JdlDocument>;
}

/// Port for the generator's config store (`.jhipster/<Entity>.json`, `.yo-rc.json`).
///
/// Implemented by:
/// - `jdlforge_adapters::LocalEntityConfigStore` (production)
/// - `jdlforge_adapters::InMemoryEntityConfigStore` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait EntityConfigStore: Send + Sync {
    /// Every entity definition, sorted by entity name.
    fn list_entities(&self) -> JdlResult<Vec<EntityDefinition>>;

    /// Application settings, if the store has any.
    fn application(&self) -> JdlResult<Option<ApplicationOverrides>>;
}
