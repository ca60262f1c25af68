//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The document file could not be read.
    #[error("Cannot read document {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },

    /// The document file was read but is not a valid construction-parameter record.
    #[error("Cannot parse document {path}: {reason}")]
    DocumentParse { path: PathBuf, reason: String },

    /// The document extension is neither `.json` nor `.toml`.
    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// One or more constructs of a document were rejected.
    #[error("The document contains {} invalid construct(s): {}", .errors.len(), join_errors(.errors))]
    InvalidDocument { errors: Vec<DomainError> },

    /// The generator config store could not be read.
    #[error("Cannot read generator config at {path}: {reason}")]
    StoreUnreadable { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Entity config store error")]
    StoreLockError,

    /// `merge_all` was called with no documents.
    #[error("At least one JDL document is needed to merge")]
    NothingToMerge,

    /// Strict validation turned repairs or consistency issues into failures.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

fn join_errors(errors: &[DomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DocumentUnreadable { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the file exists and is readable".into(),
            ],
            Self::DocumentParse { .. } => vec![
                "Documents list entities, enums, relationships, options, applications and deployments"
                    .into(),
                "Keys are camelCase, e.g. injectedFieldInFrom".into(),
            ],
            Self::UnsupportedFormat { .. } => {
                vec!["Use a .json or .toml document".into()]
            }
            Self::InvalidDocument { errors } => errors
                .iter()
                .flat_map(DomainError::suggestions)
                .fold(Vec::new(), |mut acc, s| {
                    if !acc.contains(&s) {
                        acc.push(s);
                    }
                    acc
                }),
            Self::StoreUnreadable { path, .. } => vec![
                format!("Expected generator files under {}", path.display()),
                "Run the command from the application's root directory".into(),
            ],
            Self::StoreLockError => vec![
                "The entity config store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::NothingToMerge => vec!["Pass at least one document: jdlforge merge a.json b.json".into()],
            Self::ValidationFailed(_) => vec![
                "Fix the listed problems, or run without --strict to accept repairs".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DocumentUnreadable { .. } | Self::StoreUnreadable { .. } => ErrorCategory::NotFound,
            Self::DocumentParse { .. }
            | Self::UnsupportedFormat { .. }
            | Self::InvalidDocument { .. }
            | Self::NothingToMerge
            | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationIssue;

    #[test]
    fn invalid_document_joins_every_error() {
        let err = ApplicationError::InvalidDocument {
            errors: vec![
                DomainError::invalid("entity", vec![ValidationIssue::NoName]),
                DomainError::UnknownOption { name: "x".into() },
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("The document contains 2 invalid construct(s): "));
        assert!(text.contains("; unknown option 'x'"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn unreadable_document_is_not_found() {
        let err = ApplicationError::DocumentUnreadable {
            path: "missing.json".into(),
            reason: "No such file".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("missing.json"));
    }
}
