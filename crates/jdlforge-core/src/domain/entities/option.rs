//! Entity-scoped generator options (`skipClient A, B`, `dto * with mapstruct except C`).

use std::fmt;

use indexmap::IndexSet;

use crate::domain::{
    error::DomainError,
    validation::ValidationIssue,
    value_objects::{BinaryOptionName, UnaryOptionName},
};

// ── OptionScope ───────────────────────────────────────────────────────────────

/// Which entities an option applies to.
///
/// `entity_names` and `excluded_names` stay disjoint: adding a name to one side
/// silently removes it from the other. An empty `entity_names` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionScope {
    entity_names: IndexSet<String>,
    excluded_names: IndexSet<String>,
}

impl OptionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.excluded_names.shift_remove(&name);
        self.entity_names.insert(name);
    }

    pub fn exclude_entity_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.entity_names.shift_remove(&name);
        self.excluded_names.insert(name);
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entity_names.iter().map(String::as_str)
    }

    pub fn excluded_names(&self) -> impl Iterator<Item = &str> {
        self.excluded_names.iter().map(String::as_str)
    }

    pub fn applies_to_all(&self) -> bool {
        self.entity_names.is_empty()
    }

    /// Whether the option applies to `entity`.
    pub fn covers(&self, entity: &str) -> bool {
        (self.applies_to_all() || self.entity_names.contains(entity))
            && !self.excluded_names.contains(entity)
    }

    /// Union both scopes. A name excluded on either side ends up excluded.
    fn absorb(&mut self, other: &OptionScope) {
        self.entity_names.extend(other.entity_names.iter().cloned());
        self.excluded_names.extend(other.excluded_names.iter().cloned());
        let excluded = &self.excluded_names;
        self.entity_names.retain(|name| !excluded.contains(name));
    }

    fn issues(&self, issues: &mut Vec<ValidationIssue>) {
        let blank = self
            .entity_names
            .iter()
            .chain(&self.excluded_names)
            .any(|n| n.trim().is_empty());
        if blank {
            issues.push(ValidationIssue::BlankEntityName);
        }
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.applies_to_all() {
            f.write_str("*")
        } else {
            f.write_str(&join(&self.entity_names))
        }
    }

    fn write_exclusions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.excluded_names.is_empty() {
            write!(f, " except {}", join(&self.excluded_names))?;
        }
        Ok(())
    }
}

fn join(names: &IndexSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

// ── Unary / Binary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOption {
    name: UnaryOptionName,
    scope: OptionScope,
}

impl UnaryOption {
    pub fn new(name: UnaryOptionName) -> Self {
        Self {
            name,
            scope: OptionScope::new(),
        }
    }

    pub const fn name(&self) -> UnaryOptionName {
        self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOption {
    name: BinaryOptionName,
    value: String,
    scope: OptionScope,
}

impl BinaryOption {
    /// A binary option is meaningless without its value.
    pub fn new(name: BinaryOptionName, value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "binary option",
                field: "value",
            });
        }
        Ok(Self {
            name,
            value,
            scope: OptionScope::new(),
        })
    }

    pub const fn name(&self) -> BinaryOptionName {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

// ── JdlOption ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JdlOption {
    Unary(UnaryOption),
    Binary(BinaryOption),
}

impl JdlOption {
    /// Build an option from its JDL spelling.
    ///
    /// Unary names ignore `value`; binary names require one.
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, DomainError> {
        if let Ok(unary) = name.parse::<UnaryOptionName>() {
            return Ok(Self::Unary(UnaryOption::new(unary)));
        }
        let binary: BinaryOptionName = name.parse()?;
        Ok(Self::Binary(BinaryOption::new(binary, value.unwrap_or_default())?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unary(o) => o.name.as_str(),
            Self::Binary(o) => o.name.as_str(),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Unary(_) => None,
            Self::Binary(o) => Some(&o.value),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// Deduplication key: `name` for unary options, `name_value` for binary ones.
    pub fn identity(&self) -> String {
        match self {
            Self::Unary(o) => o.name.as_str().to_string(),
            Self::Binary(o) => format!("{}_{}", o.name, o.value),
        }
    }

    pub fn scope(&self) -> &OptionScope {
        match self {
            Self::Unary(o) => &o.scope,
            Self::Binary(o) => &o.scope,
        }
    }

    fn scope_mut(&mut self) -> &mut OptionScope {
        match self {
            Self::Unary(o) => &mut o.scope,
            Self::Binary(o) => &mut o.scope,
        }
    }

    pub fn add_entity_name(&mut self, name: impl Into<String>) {
        self.scope_mut().add_entity_name(name);
    }

    pub fn add_entity_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_entity_name(name);
        }
    }

    pub fn exclude_entity_name(&mut self, name: impl Into<String>) {
        self.scope_mut().exclude_entity_name(name);
    }

    pub fn with_entity_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_entity_names(names);
        self
    }

    pub fn with_excluded_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.exclude_entity_name(name);
        }
        self
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.scope().entity_names()
    }

    pub fn excluded_names(&self) -> impl Iterator<Item = &str> {
        self.scope().excluded_names()
    }

    /// Union `other`'s scope into this option.
    ///
    /// Returns `false`, leaving `self` untouched, when `other` is a different
    /// kind of option or has a different name or value.
    pub fn add_entities_from_another_option(&mut self, other: &JdlOption) -> bool {
        if self.is_binary() != other.is_binary() || self.identity() != other.identity() {
            return false;
        }
        self.scope_mut().absorb(other.scope());
        true
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Self::Binary(o) = self {
            if o.value.trim().is_empty() {
                issues.push(ValidationIssue::NoOptionValue);
            } else if let Some(allowed) = o.name.allowed_values() {
                if !allowed.contains(&o.value.as_str()) {
                    issues.push(ValidationIssue::InvalidOptionValue(o.value.clone()));
                }
            }
        }
        self.scope().issues(&mut issues);
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl From<UnaryOption> for JdlOption {
    fn from(option: UnaryOption) -> Self {
        Self::Unary(option)
    }
}

impl From<BinaryOption> for JdlOption {
    fn from(option: BinaryOption) -> Self {
        Self::Binary(option)
    }
}

impl fmt::Display for JdlOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.name())?;
        self.scope().write_to(f)?;
        if let Some(value) = self.value() {
            write!(f, " with {value}")?;
        }
        self.scope().write_exclusions(f)
    }
}
