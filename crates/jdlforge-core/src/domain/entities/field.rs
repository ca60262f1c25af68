//! Entity fields and their validation rules.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{non_blank, write_comment},
    error::DomainError,
    validation::{ValidationIssue, check_name},
    value_objects::{FieldType, ValidationRuleName},
};

// ── RuleValue ─────────────────────────────────────────────────────────────────

/// Argument of a validation rule: `min(0)`, `max(1.5)`, `pattern(/[A-Z]+/)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl RuleValue {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RuleValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ── ValidationRule ────────────────────────────────────────────────────────────

/// A field validation directive. The default is a bare `required`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationRule {
    name: ValidationRuleName,
    value: Option<RuleValue>,
}

impl ValidationRule {
    pub fn new(name: ValidationRuleName) -> Self {
        Self { name, value: None }
    }

    pub fn with_value(name: ValidationRuleName, value: impl Into<RuleValue>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    pub const fn name(&self) -> ValidationRuleName {
        self.name
    }

    pub fn value(&self) -> Option<&RuleValue> {
        self.value.as_ref()
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let missing = self.value.as_ref().is_none_or(RuleValue::is_blank);
        if self.name.requires_value() && missing {
            vec![ValidationIssue::NoValue]
        } else {
            Vec::new()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.name) {
            (None, name) => write!(f, "{name}"),
            (Some(RuleValue::Text(text)), ValidationRuleName::Pattern) => {
                if is_slash_wrapped(text) {
                    write!(f, "pattern({text})")
                } else {
                    write!(f, "pattern(/{text}/)")
                }
            }
            (Some(value), name) => write!(f, "{name}({value})"),
        }
    }
}

fn is_slash_wrapped(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('/') && text.ends_with('/')
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// A typed attribute of an entity.
///
/// `field_type` is either a JDL primitive (`String`, `Long`, …) or the name of
/// an enumeration declared elsewhere in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    field_type: String,
    comment: Option<String>,
    validations: IndexMap<ValidationRuleName, ValidationRule>,
}

impl Field {
    /// Create a field. Both name and type are mandatory.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let field_type = field_type.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "field",
                field: "name",
            });
        }
        if field_type.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "field",
                field: "type",
            });
        }
        Ok(Self {
            name,
            field_type,
            comment: None,
            validations: IndexMap::new(),
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The primitive type, or `None` when the type names an enum.
    pub fn primitive_type(&self) -> Option<FieldType> {
        FieldType::primitive(&self.field_type)
    }

    /// Add a validation rule, replacing any rule with the same name.
    pub fn add_validation(&mut self, rule: ValidationRule) -> Result<(), DomainError> {
        let errors = rule.issues();
        if !errors.is_empty() {
            return Err(DomainError::InvalidValidation {
                field: self.name.clone(),
                errors,
            });
        }
        self.validations.insert(rule.name(), rule);
        Ok(())
    }

    /// Rules in insertion order.
    pub fn validations(&self) -> impl Iterator<Item = &ValidationRule> {
        self.validations.values()
    }

    pub fn validation(&self, name: ValidationRuleName) -> Option<&ValidationRule> {
        self.validations.get(&name)
    }

    pub fn has_validation(&self, name: ValidationRuleName) -> bool {
        self.validations.contains_key(&name)
    }

    pub fn validation_count(&self) -> usize {
        self.validations.len()
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_name(&self.name, &mut issues);
        if self.field_type.trim().is_empty() {
            issues.push(ValidationIssue::NoType);
        }
        for rule in self.validations.values().filter(|r| !r.is_valid()) {
            issues.push(ValidationIssue::WrongValidation(rule.name().to_string()));
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// Render this field with every line prefixed by `indent`.
    pub(crate) fn write_indented(&self, f: &mut impl fmt::Write, indent: &str) -> fmt::Result {
        if let Some(comment) = non_blank(self.comment.as_deref()) {
            write_comment(f, comment, indent)?;
        }
        write!(f, "{indent}{} {}", self.name, self.field_type)?;
        for rule in self.validations.values() {
            write!(f, " {rule}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, "")
    }
}
