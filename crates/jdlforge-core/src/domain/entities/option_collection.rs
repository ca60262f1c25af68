use std::fmt;

use indexmap::IndexMap;

use crate::domain::{entities::option::JdlOption, error::DomainError};

/// Options keyed by identity; colliding identities merge their scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionCollection {
    options: IndexMap<String, JdlOption>,
}

impl OptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `option`, or fold its scope into an existing option with the
    /// same identity.
    ///
    /// Returns `Ok(true)` on insertion and `Ok(false)` on merge.
    pub fn add_option(&mut self, option: JdlOption) -> Result<bool, DomainError> {
        let errors = option.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("option", errors));
        }
        let identity = option.identity();
        match self.options.get_mut(&identity) {
            Some(existing) => {
                existing.add_entities_from_another_option(&option);
                Ok(false)
            }
            None => {
                self.options.insert(identity, option);
                Ok(true)
            }
        }
    }

    /// Whether any option with this name exists, whatever its value.
    pub fn has(&self, name: &str) -> bool {
        self.options.values().any(|o| o.name() == name)
    }

    /// Lookup by identity (`skipClient`, `dto_mapstruct`).
    pub fn get(&self, identity: &str) -> Option<&JdlOption> {
        self.options.get(identity)
    }

    /// Every option sharing `name`, e.g. several `service` options with different values.
    pub fn options_for_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a JdlOption> + 'a {
        self.options.values().filter(move |o| o.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JdlOption> {
        self.options.values()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl fmt::Display for OptionCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, option) in self.options.values().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}
