use thiserror::Error;

use crate::domain::entities::{
    application::ApplicationConfig, deployment::DeploymentConfig, entity::Entity,
    enumeration::Enumeration, field::Field, option::JdlOption, relationship::Relationship,
};

/// A single violated structural rule.
///
/// Every construct reports all of its issues at once so the operator sees the
/// whole list in one pass.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    // ── names ────────────────────────────────────────────────────────────────
    #[error("No name")]
    NoName,
    #[error("Illegal name")]
    IllegalName,
    #[error("Reserved keyword")]
    ReservedKeyword,

    // ── fields / entities / enums ────────────────────────────────────────────
    #[error("No type")]
    NoType,
    #[error("No table name")]
    NoTableName,
    #[error("Invalid field '{0}'")]
    InvalidField(String),
    #[error("Wrong validation '{0}'")]
    WrongValidation(String),
    #[error("No value")]
    NoValue,
    #[error("Duplicate enum value '{0}'")]
    DuplicateEnumValue(String),

    // ── relationships ────────────────────────────────────────────────────────
    #[error("No source entity")]
    NoSourceEntity,
    #[error("No destination entity")]
    NoDestinationEntity,
    #[error("No injected field")]
    NoInjectedField,

    // ── applications ─────────────────────────────────────────────────────────
    #[error("No base name")]
    NoBaseName,
    #[error("No package name")]
    NoPackageName,
    #[error("No native language")]
    NoNativeLanguage,
    #[error("No JWT secret key")]
    NoJwtSecretKey,
    #[error("No remember-me key")]
    NoRememberMeKey,
    #[error("skipClient must be true")]
    SkipClientRequired,

    // ── deployments ──────────────────────────────────────────────────────────
    #[error("No apps folders")]
    NoAppsFolders,
    #[error("No docker repository name")]
    NoDockerRepositoryName,

    // ── options ──────────────────────────────────────────────────────────────
    #[error("No option value")]
    NoOptionValue,
    #[error("Invalid option value '{0}'")]
    InvalidOptionValue(String),
    #[error("Blank entity name in option scope")]
    BlankEntityName,

    #[error("No JDL object")]
    NoJdlObject,
}

// ============================================================================
// Reserved words
// ============================================================================

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "null", "package", "private", "protected", "public", "return",
    "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "var", "void", "volatile", "while",
];

/// Names the generated application already uses for its own entities and beans.
const GENERATOR_ENTITY_NAMES: &[&str] = &[
    "account",
    "authority",
    "persistentaudit",
    "persistenttoken",
    "user",
    "userdetails",
];

/// Whether `name` is a Java reserved word, compared case-insensitively.
pub fn is_reserved_keyword(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    JAVA_KEYWORDS.contains(&lower.as_str())
}

/// Whether `name` may not be used for a user-declared entity.
pub fn is_reserved_entity_name(name: &str) -> bool {
    is_reserved_keyword(name) || GENERATOR_ENTITY_NAMES.contains(&name.to_ascii_lowercase().as_str())
}

/// Push every name-related issue for `name` onto `issues`.
///
/// A legal name starts with a letter and continues with letters, digits or `_`.
pub fn check_name(name: &str, issues: &mut Vec<ValidationIssue>) {
    let name = name.trim();
    if name.is_empty() {
        issues.push(ValidationIssue::NoName);
        return;
    }
    let mut chars = name.chars();
    let legal = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !legal {
        issues.push(ValidationIssue::IllegalName);
    }
    if is_reserved_keyword(name) {
        issues.push(ValidationIssue::ReservedKeyword);
    }
}

pub(crate) fn into_result(issues: Vec<ValidationIssue>) -> Result<(), Vec<ValidationIssue>> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

// ============================================================================
// Facade
// ============================================================================

/// Centralized structural validation.
///
/// Each method returns every violated rule, never just the first.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_field(field: &Field) -> Result<(), Vec<ValidationIssue>> {
        into_result(field.issues())
    }

    pub fn validate_entity(entity: &Entity) -> Result<(), Vec<ValidationIssue>> {
        into_result(entity.issues())
    }

    pub fn validate_enum(enumeration: &Enumeration) -> Result<(), Vec<ValidationIssue>> {
        into_result(enumeration.issues())
    }

    pub fn validate_relationship(relationship: &Relationship) -> Result<(), Vec<ValidationIssue>> {
        into_result(relationship.issues())
    }

    pub fn validate_option(option: &JdlOption) -> Result<(), Vec<ValidationIssue>> {
        into_result(option.issues())
    }

    pub fn validate_application(application: &ApplicationConfig) -> Result<(), Vec<ValidationIssue>> {
        into_result(application.issues())
    }

    pub fn validate_deployment(deployment: &DeploymentConfig) -> Result<(), Vec<ValidationIssue>> {
        into_result(deployment.issues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues_for(name: &str) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_name(name, &mut issues);
        issues
    }

    #[test]
    fn legal_names_pass() {
        assert!(issues_for("JobHistory").is_empty());
        assert!(issues_for("my_field2").is_empty());
    }

    #[test]
    fn blank_name_reports_only_no_name() {
        assert_eq!(issues_for("  "), vec![ValidationIssue::NoName]);
    }

    #[test]
    fn illegal_characters_are_reported() {
        assert_eq!(issues_for("2fast"), vec![ValidationIssue::IllegalName]);
        assert_eq!(issues_for("my-field"), vec![ValidationIssue::IllegalName]);
    }

    #[test]
    fn reserved_keywords_are_case_insensitive() {
        assert_eq!(issues_for("Class"), vec![ValidationIssue::ReservedKeyword]);
        assert!(is_reserved_keyword("PUBLIC"));
        assert!(!is_reserved_keyword("publication"));
    }

    #[test]
    fn generator_entity_names_are_reserved_for_entities_only() {
        assert!(is_reserved_entity_name("User"));
        assert!(!is_reserved_keyword("user"));
    }

    #[test]
    fn issue_text_matches_operator_wording() {
        assert_eq!(ValidationIssue::NoTableName.to_string(), "No table name");
        assert_eq!(
            ValidationIssue::DuplicateEnumValue("FRENCH".into()).to_string(),
            "Duplicate enum value 'FRENCH'"
        );
    }
}
