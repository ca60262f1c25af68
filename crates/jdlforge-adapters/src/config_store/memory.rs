//! In-memory entity config store.

use std::sync::{Arc, RwLock};

use jdlforge_core::{
    application::{ApplicationError, dto::EntityDefinition, ports::EntityConfigStore},
    domain::ApplicationOverrides,
    error::JdlResult,
};

#[derive(Debug, Default)]
struct Inner {
    entities: Vec<EntityDefinition>,
    application: Option<ApplicationOverrides>,
}

/// Thread-safe in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityConfigStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEntityConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the definition with the same entity name.
    pub fn insert(&self, definition: EntityDefinition) -> JdlResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        match inner.entities.iter_mut().find(|d| d.name == definition.name) {
            Some(existing) => *existing = definition,
            None => inner.entities.push(definition),
        }
        Ok(())
    }

    pub fn set_application(&self, overrides: ApplicationOverrides) -> JdlResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.application = Some(overrides);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.entities.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityConfigStore for InMemoryEntityConfigStore {
    fn list_entities(&self) -> JdlResult<Vec<EntityDefinition>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let mut entities = inner.entities.clone();
        entities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entities)
    }

    fn application(&self) -> JdlResult<Option<ApplicationOverrides>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.application.clone())
    }
}
