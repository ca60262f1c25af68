//! The JDL document root.
//!
//! Every `add_*` method runs the child's structural check first and rejects it
//! with a single error listing every violated rule. Applications, deployments,
//! entities and enums are replaced on key collision; relationships and options
//! go through their collection's dedup/merge rules.

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::domain::{
    entities::{
        application::ApplicationConfig,
        deployment::DeploymentConfig,
        entity::Entity,
        enumeration::Enumeration,
        option::JdlOption,
        option_collection::OptionCollection,
        relationship::{Relationship, RelationshipRepair},
        relationship_collection::RelationshipCollection,
    },
    error::DomainError,
    value_objects::{BinaryOptionName, DeploymentType, FieldType},
};

/// Entity provided by the generator itself; relationships may target it
/// without declaring it.
pub const BUILT_IN_USER_ENTITY: &str = "User";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JdlObject {
    pub(crate) applications: IndexMap<String, ApplicationConfig>,
    pub(crate) deployments: IndexMap<DeploymentType, DeploymentConfig>,
    pub(crate) entities: IndexMap<String, Entity>,
    pub(crate) enums: IndexMap<String, Enumeration>,
    pub(crate) relationships: RelationshipCollection,
    pub(crate) options: OptionCollection,
}

impl JdlObject {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Add or replace the application with the same base name.
    pub fn add_application(&mut self, application: ApplicationConfig) -> Result<(), DomainError> {
        let errors = application.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("application", errors));
        }
        self.applications
            .insert(application.base_name().to_string(), application);
        Ok(())
    }

    /// Add or replace the deployment with the same deployment type.
    pub fn add_deployment(&mut self, deployment: DeploymentConfig) -> Result<(), DomainError> {
        let errors = deployment.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("deployment", errors));
        }
        self.deployments
            .insert(deployment.deployment_type, deployment);
        Ok(())
    }

    /// Add or replace the entity with the same name.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), DomainError> {
        let errors = entity.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("entity", errors));
        }
        self.entities.insert(entity.name().to_string(), entity);
        Ok(())
    }

    /// Add or replace the enum with the same name. Duplicate keys are rejected.
    pub fn add_enum(&mut self, enumeration: Enumeration) -> Result<(), DomainError> {
        let errors = enumeration.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("enum", errors));
        }
        self.enums
            .insert(enumeration.name().to_string(), enumeration);
        Ok(())
    }

    /// Returns `Ok(false)` when a relationship with the same identity exists.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<bool, DomainError> {
        self.relationships.add(relationship)
    }

    /// Returns `Ok(false)` when the option was merged into an existing one.
    pub fn add_option(&mut self, option: JdlOption) -> Result<bool, DomainError> {
        self.options.add_option(option)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn application(&self, base_name: &str) -> Option<&ApplicationConfig> {
        self.applications.get(base_name)
    }

    pub fn applications(&self) -> impl Iterator<Item = &ApplicationConfig> {
        self.applications.values()
    }

    pub fn deployment(&self, deployment_type: DeploymentType) -> Option<&DeploymentConfig> {
        self.deployments.get(&deployment_type)
    }

    pub fn deployments(&self) -> impl Iterator<Item = &DeploymentConfig> {
        self.deployments.values()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Mutable access for adding fields; fields are validated by [`Entity::add_field`].
    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.get_mut(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enums.get(name)
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enumeration> {
        self.enums.values()
    }

    pub fn relationships(&self) -> &RelationshipCollection {
        &self.relationships
    }

    pub fn options(&self) -> &OptionCollection {
        &self.options
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    pub fn deployment_count(&self) -> usize {
        self.deployments.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
            && self.deployments.is_empty()
            && self.entities.is_empty()
            && self.enums.is_empty()
            && self.relationships.is_empty()
            && self.options.is_empty()
    }

    /// Whether a `microservice` option covers `entity_name`.
    ///
    /// A microservice option with no explicit entity list covers every entity
    /// that it does not exclude.
    pub fn is_entity_in_microservice(&self, entity_name: &str) -> bool {
        self.options
            .options_for_name(BinaryOptionName::Microservice.as_str())
            .any(|option| option.scope().covers(entity_name))
    }

    // ========================================================================
    // Semantic checks
    // ========================================================================

    /// Run every relationship's cardinality rules.
    ///
    /// Returns a corrected copy of the document plus the repairs applied, or
    /// every error found. Relationships must reference declared entities or
    /// the built-in `User`, and a repair may not move one onto another's id.
    pub fn validate_relationships(
        &self,
    ) -> Result<(JdlObject, Vec<RelationshipRepair>), Vec<DomainError>> {
        let mut errors = Vec::new();
        let mut repairs = Vec::new();
        let mut corrected = RelationshipCollection::new();

        for relationship in &self.relationships {
            if let Some(unknown) = [relationship.from(), relationship.to()]
                .into_iter()
                .find(|name| !self.knows_entity(name))
            {
                errors.push(DomainError::UnknownEntity {
                    entity: unknown.to_string(),
                    from: relationship.from().to_string(),
                    to: relationship.to().to_string(),
                });
                continue;
            }
            match relationship.validate() {
                Ok(outcome) => {
                    let (fixed, applied) = outcome.into_owned();
                    let repaired = fixed.id();
                    repairs.extend(applied);
                    match corrected.add(fixed) {
                        Ok(true) => {}
                        // A repair moved it onto an id that is already taken.
                        Ok(false) => errors.push(DomainError::RepairedRelationshipCollision {
                            original: relationship.id(),
                            repaired,
                        }),
                        Err(err) => errors.push(err),
                    }
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let mut document = self.clone();
        document.relationships = corrected;
        Ok((document, repairs))
    }

    fn knows_entity(&self, name: &str) -> bool {
        name == BUILT_IN_USER_ENTITY || self.entities.contains_key(name)
    }

    /// Cross-reference problems that do not prevent building the document.
    pub fn check_consistency(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        for entity in self.entities.values() {
            for field in entity.fields() {
                match field.primitive_type() {
                    None if !self.enums.contains_key(field.field_type()) => {
                        issues.push(ConsistencyIssue::UnknownFieldType {
                            entity: entity.name().to_string(),
                            field: field.name().to_string(),
                            field_type: field.field_type().to_string(),
                        });
                    }
                    None => {}
                    Some(primitive) => {
                        let allowed = primitive.allowed_validations();
                        for rule in field.validations().filter(|r| !allowed.contains(&r.name())) {
                            issues.push(ConsistencyIssue::DisallowedValidation {
                                entity: entity.name().to_string(),
                                field: field.name().to_string(),
                                rule: rule.name().to_string(),
                                field_type: primitive,
                            });
                        }
                    }
                }
            }
        }

        for option in self.options.iter() {
            for name in option.entity_names().chain(option.excluded_names()) {
                if !self.entities.contains_key(name) {
                    issues.push(ConsistencyIssue::OptionScopeUnknownEntity {
                        option: option.name().to_string(),
                        entity: name.to_string(),
                    });
                }
            }
        }

        for application in self.applications.values() {
            for name in application.entity_names().filter(|n| *n != "*") {
                if !self.entities.contains_key(name) {
                    issues.push(ConsistencyIssue::ApplicationUnknownEntity {
                        application: application.base_name().to_string(),
                        entity: name.to_string(),
                    });
                }
            }
        }

        issues
    }
}

/// A dangling or ill-typed reference inside an otherwise valid document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    #[error("field '{field}' of entity '{entity}' has unknown type '{field_type}'")]
    UnknownFieldType {
        entity: String,
        field: String,
        field_type: String,
    },

    #[error("validation '{rule}' is not allowed on {field_type} field '{entity}.{field}'")]
    DisallowedValidation {
        entity: String,
        field: String,
        rule: String,
        field_type: FieldType,
    },

    #[error("option '{option}' references unknown entity '{entity}'")]
    OptionScopeUnknownEntity { option: String, entity: String },

    #[error("application '{application}' lists unknown entity '{entity}'")]
    ApplicationUnknownEntity { application: String, entity: String },
}

impl fmt::Display for JdlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<String> = Vec::new();
        let mut push_all = |items: Vec<String>| {
            if !items.is_empty() {
                sections.push(items.join("\n\n"));
            }
        };
        push_all(self.applications.values().map(ToString::to_string).collect());
        push_all(self.deployments.values().map(ToString::to_string).collect());
        push_all(self.entities.values().map(ToString::to_string).collect());
        push_all(self.enums.values().map(ToString::to_string).collect());
        if !self.relationships.is_empty() {
            sections.push(self.relationships.to_string());
        }
        if !self.options.is_empty() {
            sections.push(self.options.to_string());
        }

        if sections.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", sections.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            application::ApplicationOverrides,
            field::{Field, ValidationRule},
        },
        validation::ValidationIssue,
        value_objects::{RelationshipType, ValidationRuleName},
    };

    fn entity(name: &str) -> Entity {
        Entity::new(name).unwrap()
    }

    fn one_to_many(from: &str, to: &str, field: &str) -> Relationship {
        Relationship::builder(RelationshipType::OneToMany, from, to)
            .injected_field_in_from(field)
            .build()
            .unwrap()
    }

    #[test]
    fn invalid_child_error_lists_every_rule() {
        let mut jdl = JdlObject::new();
        let err = jdl
            .add_entity(entity("class").with_table_name(""))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The entity must be valid in order to be added to the JDL object. Errors: Reserved keyword, No table name"
        );
        assert_eq!(jdl.entity_count(), 0);
    }

    #[test]
    fn entities_are_replaced_on_collision() {
        let mut jdl = JdlObject::new();
        jdl.add_entity(entity("A").with_comment("first")).unwrap();
        jdl.add_entity(entity("A").with_comment("second")).unwrap();
        assert_eq!(jdl.entity_count(), 1);
        assert_eq!(jdl.entity("A").unwrap().comment(), Some("second"));
    }

    #[test]
    fn enums_with_duplicate_keys_are_rejected() {
        let mut jdl = JdlObject::new();
        let e = Enumeration::new("Level")
            .unwrap()
            .with_value("LOW", None)
            .with_value("LOW", None);
        assert!(jdl.add_enum(e).is_err());
    }

    #[test]
    fn microservice_option_scope() {
        let mut jdl = JdlObject::new();
        assert!(!jdl.is_entity_in_microservice("A"));

        jdl.add_option(
            JdlOption::parse("microservice", Some("store"))
                .unwrap()
                .with_entity_names(["A"]),
        )
        .unwrap();
        assert!(jdl.is_entity_in_microservice("A"));
        assert!(!jdl.is_entity_in_microservice("B"));

        jdl.add_option(
            JdlOption::parse("microservice", Some("invoice"))
                .unwrap()
                .with_excluded_names(["C"]),
        )
        .unwrap();
        assert!(jdl.is_entity_in_microservice("B"));
        assert!(!jdl.is_entity_in_microservice("C"));
    }

    #[test]
    fn relationship_validation_returns_repaired_copy() {
        let mut jdl = JdlObject::new();
        jdl.add_entity(entity("Department")).unwrap();
        jdl.add_entity(entity("Employee")).unwrap();
        jdl.add_relationship(one_to_many("Department", "Employee", "employee"))
            .unwrap();

        let (fixed, repairs) = jdl.validate_relationships().unwrap();
        assert_eq!(repairs.len(), 1);
        let rel = fixed.relationships().iter().next().unwrap();
        assert_eq!(rel.injected_field_in_to(), Some("department"));
        // The source document keeps its original relationship.
        let original = jdl.relationships().iter().next().unwrap();
        assert_eq!(original.injected_field_in_to(), None);
    }

    #[test]
    fn repair_colliding_with_another_relationship_is_an_error() {
        let mut jdl = JdlObject::new();
        jdl.add_entity(entity("A")).unwrap();
        jdl.add_entity(entity("B")).unwrap();
        jdl.add_relationship(
            Relationship::builder(RelationshipType::OneToMany, "A", "B")
                .injected_field_in_to("owner")
                .build()
                .unwrap(),
        )
        .unwrap();
        jdl.add_relationship(
            Relationship::builder(RelationshipType::OneToMany, "A", "B")
                .injected_field_in_from("b")
                .injected_field_in_to("other")
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(jdl.relationship_count(), 2);

        let errors = jdl.validate_relationships().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            DomainError::RepairedRelationshipCollision { original, repaired }
                if original == "OneToMany_A_B" && repaired == "OneToMany_A{b}_B"
        ));
        assert_eq!(jdl.relationship_count(), 2);
    }

    #[test]
    fn relationship_to_unknown_entity_is_rejected() {
        let mut jdl = JdlObject::new();
        jdl.add_entity(entity("Car")).unwrap();
        jdl.add_relationship(
            Relationship::builder(RelationshipType::ManyToOne, "Car", "User")
                .injected_field_in_from("owner")
                .build()
                .unwrap(),
        )
        .unwrap();
        jdl.add_relationship(
            Relationship::builder(RelationshipType::ManyToOne, "Car", "Garage")
                .injected_field_in_from("garage")
                .build()
                .unwrap(),
        )
        .unwrap();

        let errors = jdl.validate_relationships().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], DomainError::UnknownEntity { entity, .. } if entity == "Garage"));
    }

    #[test]
    fn consistency_reports_dangling_references() {
        let mut jdl = JdlObject::new();
        let mut book = entity("Book");
        book.add_field(Field::new("genre", "Genre").unwrap()).unwrap();
        let mut pages = Field::new("pages", "Integer").unwrap();
        pages
            .add_validation(ValidationRule::with_value(ValidationRuleName::Pattern, "\\d+"))
            .unwrap();
        book.add_field(pages).unwrap();
        jdl.add_entity(book).unwrap();
        jdl.add_option(JdlOption::parse("filter", None).unwrap().with_entity_names(["Author"]))
            .unwrap();
        jdl.add_application(
            ApplicationConfig::new(ApplicationOverrides::default()).with_entity_names(["Book", "Shelf"]),
        )
        .unwrap();

        let issues = jdl.check_consistency();
        assert_eq!(issues.len(), 4);
        assert!(matches!(issues[0], ConsistencyIssue::UnknownFieldType { .. }));
        assert!(matches!(issues[1], ConsistencyIssue::DisallowedValidation { .. }));
        assert!(matches!(issues[2], ConsistencyIssue::OptionScopeUnknownEntity { .. }));
        assert!(matches!(issues[3], ConsistencyIssue::ApplicationUnknownEntity { .. }));
    }

    #[test]
    fn renders_sections_in_order() {
        let mut jdl = JdlObject::new();
        jdl.add_entity(entity("A")).unwrap();
        jdl.add_entity(entity("B")).unwrap();
        jdl.add_enum(Enumeration::new("Level").unwrap().with_value("LOW", None))
            .unwrap();
        jdl.add_relationship(one_to_many("A", "B", "b")).unwrap();
        jdl.add_option(JdlOption::parse("dto", Some("mapstruct")).unwrap())
            .unwrap();

        assert_eq!(
            jdl.to_string(),
            "entity A\n\nentity B\n\nenum Level {\n  LOW\n}\n\nrelationship OneToMany {\n  A{b} to B\n}\n\ndto * with mapstruct\n"
        );
    }

    #[test]
    fn application_failure_names_issue() {
        let mut jdl = JdlObject::new();
        let app = ApplicationConfig::microservice(ApplicationOverrides {
            skip_client: Some(false),
            ..Default::default()
        });
        let err = jdl.add_application(app).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid("application", vec![ValidationIssue::SkipClientRequired])
        );
    }
}
