// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for jdlforge: the in-memory JDL model.
//!
//! This module contains pure business logic. Reading documents, walking the
//! generator config directory and logging are handled by the application
//! layer and the adapters.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: repairs and dedup decisions are returned as values
//! - **Value semantics**: every construct is `Clone` and compared by value
//! - **Rich domain model**: validation and rendering live on the constructs
//!
// Public API - what the world sees
pub mod common;
pub mod entities;
pub mod error;
pub mod registry;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    ApplicationConfig, ApplicationOverrides, ApplicationSettings, BUILT_IN_USER_ENTITY,
    BinaryOption, ConsistencyIssue, DeploymentConfig, DeploymentOverrides, EnumValue,
    Enumeration, Entity, Field, JdlObject, JdlOption, MergeReport, OptionCollection,
    OptionScope, Relationship, RelationshipBuilder, RelationshipCollection, RelationshipRepair,
    RelationshipSide, RelationshipValidation, RuleValue, UnaryOption, ValidationRule,
    merge_jdl_objects, merge_with_report,
};

pub use error::{DomainError, ErrorCategory};
pub use registry::EnumRegistry;
pub use validation::{DomainValidator, ValidationIssue};

pub use value_objects::{
    ApplicationType, AuthenticationType, BinaryOptionName, DeploymentType, FieldType,
    RelationshipType, UnaryOptionName, ValidationRuleName,
};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Facade
    // ========================================================================

    #[test]
    fn validator_collects_every_issue() {
        let entity = Entity::new("new").unwrap().with_table_name(" ");
        let issues = DomainValidator::validate_entity(&entity).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::ReservedKeyword, ValidationIssue::NoTableName]
        );
    }

    #[test]
    fn validator_accepts_valid_constructs() {
        let field = Field::new("title", "String").unwrap();
        assert!(DomainValidator::validate_field(&field).is_ok());

        let option = JdlOption::parse("search", Some("elasticsearch")).unwrap();
        assert!(DomainValidator::validate_option(&option).is_ok());

        let app = ApplicationConfig::gateway(ApplicationOverrides::default());
        assert!(DomainValidator::validate_application(&app).is_ok());
    }

    #[test]
    fn validator_reports_deployment_and_enum_issues() {
        let deployment = DeploymentConfig::new(DeploymentOverrides {
            apps_folders: Some(vec!["store".into()]),
            ..Default::default()
        });
        assert_eq!(
            DomainValidator::validate_deployment(&deployment).unwrap_err(),
            vec![ValidationIssue::NoDockerRepositoryName]
        );

        let e = Enumeration::new("9Lives").unwrap();
        assert_eq!(
            DomainValidator::validate_enum(&e).unwrap_err(),
            vec![ValidationIssue::IllegalName]
        );
    }

    // ========================================================================
    // End to end
    // ========================================================================

    #[test]
    fn relationship_facade_matches_builder_invariant() {
        let rel = Relationship::builder(RelationshipType::ManyToMany, "A", "B")
            .injected_field_in_from("b")
            .injected_field_in_to("a")
            .build()
            .unwrap();
        assert!(DomainValidator::validate_relationship(&rel).is_ok());
    }
}
