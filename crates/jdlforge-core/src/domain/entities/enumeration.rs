use std::collections::HashSet;
use std::fmt;

use crate::domain::{
    common::{non_blank, write_comment},
    error::DomainError,
    validation::{ValidationIssue, check_name},
};

/// One enumeration constant, optionally carrying a display value: `FRENCH (fr)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    key: String,
    value: Option<String>,
}

impl EnumValue {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match non_blank(self.value.as_deref()) {
            Some(value) => write!(f, "{} ({value})", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// A named, ordered set of constants usable as a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    name: String,
    comment: Option<String>,
    values: Vec<EnumValue>,
}

impl Enumeration {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "enum",
                field: "name",
            });
        }
        Ok(Self {
            name,
            comment: None,
            values: Vec::new(),
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.add_value(key, value);
        self
    }

    /// Append a constant. Duplicate keys are kept and reported by [`Self::issues`].
    pub fn add_value(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.values.push(EnumValue::new(key, value.map(str::to_string)));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.iter().any(|v| v.key == key)
    }

    /// `A,B (b),C`
    pub fn values_as_string(&self) -> String {
        self.values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_name(&self.name, &mut issues);

        let mut seen = HashSet::new();
        for value in &self.values {
            if !seen.insert(value.key.as_str()) {
                let issue = ValidationIssue::DuplicateEnumValue(value.key.clone());
                if !issues.contains(&issue) {
                    issues.push(issue);
                }
            }
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = non_blank(self.comment.as_deref()) {
            write_comment(f, comment, "")?;
        }
        write!(f, "enum {} {{\n  {}\n}}", self.name, self.values_as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language() -> Enumeration {
        Enumeration::new("Language")
            .unwrap()
            .with_value("FRENCH", Some("fr"))
            .with_value("ENGLISH", None)
    }

    #[test]
    fn values_render_with_optional_display_value() {
        assert_eq!(language().values_as_string(), "FRENCH (fr),ENGLISH");
    }

    #[test]
    fn renders_block_with_comment() {
        let e = language().with_comment("Spoken languages");
        assert_eq!(
            e.to_string(),
            "/**\n * Spoken languages\n */\nenum Language {\n  FRENCH (fr),ENGLISH\n}"
        );
    }

    #[test]
    fn duplicate_keys_are_reported_once() {
        let e = language()
            .with_value("FRENCH", None)
            .with_value("FRENCH", None);
        assert_eq!(
            e.issues(),
            vec![ValidationIssue::DuplicateEnumValue("FRENCH".into())]
        );
    }

    #[test]
    fn name_is_mandatory() {
        assert!(Enumeration::new("").is_err());
    }
}
