// ============================================================================
// domain/error.rs - JDL DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::{validation::ValidationIssue, value_objects::RelationshipType};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (a merge can report the same failure for both inputs)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Aggregate validity errors
    // ========================================================================
    #[error(
        "The {kind} must be valid in order to be added to the JDL object. Errors: {}",
        join_issues(.errors)
    )]
    InvalidObject {
        kind: &'static str,
        errors: Vec<ValidationIssue>,
    },

    #[error(
        "The field '{field}' of entity '{entity}' is invalid. Errors: {}",
        join_issues(.errors)
    )]
    InvalidField {
        entity: String,
        field: String,
        errors: Vec<ValidationIssue>,
    },

    #[error(
        "The validation passed to field '{field}' is invalid. Errors: {}",
        join_issues(.errors)
    )]
    InvalidValidation {
        field: String,
        errors: Vec<ValidationIssue>,
    },

    // ========================================================================
    // Construction invariants
    // ========================================================================
    #[error("The {kind}'s {field} must be passed to create it")]
    MissingRequiredField {
        kind: &'static str,
        field: &'static str,
    },

    #[error(
        "A valid type and at least one injected field must be passed to create a relationship (from {from} to {to})"
    )]
    IncompleteRelationship { from: String, to: String },

    #[error("unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("unknown option '{name}'")]
    UnknownOption { name: String },

    // ========================================================================
    // Semantic (cross-referential) errors
    // ========================================================================
    #[error("In the {} relationship from {from} to {to}, {reason}", .kind.label())]
    RelationshipRule {
        kind: RelationshipType,
        from: String,
        to: String,
        reason: String,
    },

    #[error("The relationship from {from} to {to} references the unknown entity '{entity}'")]
    UnknownEntity {
        entity: String,
        from: String,
        to: String,
    },

    #[error(
        "Repairing the relationship '{original}' changes its id to '{repaired}', which another relationship already uses"
    )]
    RepairedRelationshipCollision { original: String, repaired: String },

    #[error("An enum named '{name}' already exists")]
    EnumAlreadyDefined { name: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    /// Shorthand for the aggregate error raised by the `JdlObject::add_*` family.
    pub fn invalid(kind: &'static str, errors: Vec<ValidationIssue>) -> Self {
        Self::InvalidObject { kind, errors }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidObject { kind, errors } => {
                let mut out = vec![format!("Fix every listed problem in the {kind} and retry")];
                if errors.contains(&ValidationIssue::ReservedKeyword) {
                    out.push("Rename it: the name is reserved by the generated code".into());
                }
                out
            }
            Self::InvalidField { entity, field, .. } => vec![
                format!("Check the declaration of '{field}' in entity '{entity}'"),
                "Fields need a name, a type, and valid validation rules".into(),
            ],
            Self::InvalidValidation { .. } => vec![
                "min, max, minlength, maxlength, pattern, minbytes and maxbytes need a value"
                    .into(),
                "required and unique take no value".into(),
            ],
            Self::IncompleteRelationship { .. } => vec![
                "Declare an injected field on at least one side, e.g. A{b} to B".into(),
            ],
            Self::RelationshipRule { kind, .. } => match kind {
                RelationshipType::OneToOne => {
                    vec!["Invert the relationship so the source entity owns it".into()]
                }
                RelationshipType::ManyToOne => {
                    vec!["Use a bidirectional One-to-Many relationship instead".into()]
                }
                RelationshipType::ManyToMany => {
                    vec!["Declare injected fields on both sides".into()]
                }
                RelationshipType::OneToMany => vec!["See documentation for more details".into()],
            },
            Self::UnknownEntity { entity, .. } => vec![
                format!("Declare entity '{entity}' or fix the relationship's entity name"),
            ],
            Self::UnknownOption { name } => vec![
                format!("'{name}' is not a JDL option"),
                "Unary: skipClient, skipServer, noFluentMethod, filter, readOnly".into(),
                "Binary: dto, service, paginate, microservice, search, angularSuffix, clientRootFolder"
                    .into(),
            ],
            Self::RepairedRelationshipCollision { original, .. } => vec![
                format!("Declare both injected fields on '{original}' so it needs no repair"),
                "Or remove the duplicate relationship".into(),
            ],
            Self::EnumAlreadyDefined { name } => vec![
                format!("Reuse the existing enum '{name}' or pick another name"),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidObject { .. }
            | Self::InvalidField { .. }
            | Self::InvalidValidation { .. }
            | Self::MissingRequiredField { .. }
            | Self::IncompleteRelationship { .. }
            | Self::UnknownValue { .. }
            | Self::UnknownOption { .. } => ErrorCategory::Validation,
            Self::RelationshipRule { .. }
            | Self::RepairedRelationshipCollision { .. }
            | Self::EnumAlreadyDefined { .. } => {
                ErrorCategory::Consistency
            }
            Self::UnknownEntity { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Consistency,
    NotFound,
    Internal,
}
