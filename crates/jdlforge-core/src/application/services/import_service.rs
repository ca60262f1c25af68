//! Import Service - turns the generator's config store into a `JdlObject`.
//!
//! Each `.jhipster/<Entity>.json` record describes one entity from its own
//! point of view, so a bidirectional relationship appears in both files. Only
//! one side is kept:
//!
//! | Type | Kept from |
//! |------|-----------|
//! | one-to-one, many-to-many | the owner side |
//! | one-to-many | always |
//! | many-to-one | only if the other entity has no matching one-to-many |

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        dto::{EntityDefinition, FieldDefinition, RelationshipDefinition},
        ports::EntityConfigStore,
    },
    domain::{
        ApplicationConfig, BinaryOption, BinaryOptionName, DomainError, Entity, EnumRegistry,
        Enumeration, Field, JdlObject, JdlOption, Relationship, RelationshipType, UnaryOption,
        UnaryOptionName, ValidationRule, ValidationRuleName, common::upper_first,
    },
    error::JdlResult,
};

/// Reads every entity definition through an [`EntityConfigStore`].
pub struct ImportService {
    store: Box<dyn EntityConfigStore>,
}

impl ImportService {
    pub fn new(store: Box<dyn EntityConfigStore>) -> Self {
        Self { store }
    }

    /// Build a document from the store's entities and application settings.
    #[instrument(skip_all)]
    pub fn import(&self) -> JdlResult<JdlObject> {
        let definitions = self.store.list_entities()?;
        let by_name: HashMap<&str, &EntityDefinition> =
            definitions.iter().map(|d| (d.name.as_str(), d)).collect();

        let mut jdl = JdlObject::new();
        let mut registry = EnumRegistry::new();

        for definition in &definitions {
            let entity = import_entity(definition, &mut jdl, &mut registry)?;
            jdl.add_entity(entity)?;
        }

        for definition in &definitions {
            for relationship in &definition.relationships {
                if !keeps(definition, relationship, &by_name) {
                    debug!(
                        entity = %definition.name,
                        relationship = %relationship.relationship_name,
                        "Relationship declared by the other side"
                    );
                    continue;
                }
                let relationship = import_relationship(&definition.name, relationship)?;
                jdl.add_relationship(relationship)?;
            }
            for option in import_options(definition)? {
                jdl.add_option(option)?;
            }
        }

        if let Some(overrides) = self.store.application()? {
            let names: Vec<String> = jdl.entity_names().map(str::to_string).collect();
            jdl.add_application(ApplicationConfig::new(overrides).with_entity_names(names))?;
        }

        info!(
            entities = jdl.entity_count(),
            enums = jdl.enum_count(),
            relationships = jdl.relationship_count(),
            options = jdl.option_count(),
            "Config store imported"
        );
        Ok(jdl)
    }
}

fn import_entity(
    definition: &EntityDefinition,
    jdl: &mut JdlObject,
    registry: &mut EnumRegistry,
) -> Result<Entity, DomainError> {
    let mut entity = Entity::new(&definition.name)?;
    if let Some(table_name) = &definition.entity_table_name {
        entity = entity.with_table_name(table_name);
    }
    if let Some(javadoc) = &definition.javadoc {
        entity = entity.with_comment(javadoc);
    }

    for field in &definition.fields {
        if let Some(values) = &field.field_values {
            if registry.register_enum(&field.field_type) {
                jdl.add_enum(parse_enum(&field.field_type, values)?)?;
            } else {
                debug!(enumeration = %field.field_type, "Enum already imported");
            }
        }
        entity.add_field(import_field(field)?)?;
    }
    Ok(entity)
}

fn import_field(definition: &FieldDefinition) -> Result<Field, DomainError> {
    let mut field = Field::new(&definition.field_name, &definition.field_type)?;
    if let Some(javadoc) = &definition.javadoc {
        field = field.with_comment(javadoc);
    }
    for rule in &definition.field_validate_rules {
        let name: ValidationRuleName = rule.parse()?;
        let rule = match definition.rule_value(name) {
            Some(value) => ValidationRule::with_value(name, value.clone()),
            None => ValidationRule::new(name),
        };
        field.add_validation(rule)?;
    }
    Ok(field)
}

/// Parse `A,B (b)` into an enum.
fn parse_enum(name: &str, values: &str) -> Result<Enumeration, DomainError> {
    let mut enumeration = Enumeration::new(name)?;
    for item in values.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        match item.split_once('(') {
            Some((key, rest)) => {
                let value = rest.trim_end_matches(')').trim();
                enumeration.add_value(key.trim(), Some(value));
            }
            None => enumeration.add_value(item, None),
        }
    }
    Ok(enumeration)
}

fn keeps(
    definition: &EntityDefinition,
    relationship: &RelationshipDefinition,
    by_name: &HashMap<&str, &EntityDefinition>,
) -> bool {
    let Ok(kind) = relationship.relationship_type.parse::<RelationshipType>() else {
        return true;
    };
    match kind {
        RelationshipType::OneToOne | RelationshipType::ManyToMany => {
            relationship.owner_side.unwrap_or(true)
        }
        RelationshipType::OneToMany => true,
        RelationshipType::ManyToOne => {
            let other = upper_first(&relationship.other_entity_name);
            let Some(other) = by_name.get(other.as_str()) else {
                return true;
            };
            !other.relationships.iter().any(|back| {
                matches!(
                    back.relationship_type.parse::<RelationshipType>(),
                    Ok(RelationshipType::OneToMany)
                )
                    && upper_first(&back.other_entity_name) == definition.name
                    && back
                        .other_entity_relationship_name
                        .as_deref()
                        .is_none_or(|name| name == relationship.relationship_name)
            })
        }
    }
}

fn import_relationship(
    from: &str,
    definition: &RelationshipDefinition,
) -> Result<Relationship, DomainError> {
    let kind: RelationshipType = definition.relationship_type.parse()?;

    let mut injected_from = definition.relationship_name.clone();
    if let Some(display) = definition
        .other_entity_field
        .as_deref()
        .filter(|f| *f != "id")
    {
        injected_from = format!("{injected_from}({display})");
    }

    let mut builder = Relationship::builder(kind, from, upper_first(&definition.other_entity_name))
        .injected_field_in_from(injected_from);
    if kind != RelationshipType::ManyToOne {
        if let Some(to) = &definition.other_entity_relationship_name {
            builder = builder.injected_field_in_to(to);
        }
    }
    if definition
        .relationship_validate_rules
        .as_ref()
        .is_some_and(|rules| rules.contains("required"))
    {
        builder = builder.injected_field_in_from_required(true);
    }
    if let Some(javadoc) = &definition.javadoc {
        builder = builder.comment_in_from(javadoc);
    }
    if definition.use_jpa_derived_identifier == Some(true) {
        builder = builder.option("jpaDerivedIdentifier", "true");
    }
    builder.build()
}

fn import_options(definition: &EntityDefinition) -> Result<Vec<JdlOption>, DomainError> {
    let binary = [
        (BinaryOptionName::Dto, &definition.dto),
        (BinaryOptionName::Service, &definition.service),
        (BinaryOptionName::Paginate, &definition.pagination),
        (BinaryOptionName::Search, &definition.search_engine),
        (BinaryOptionName::Microservice, &definition.microservice_name),
        (BinaryOptionName::AngularSuffix, &definition.angular_js_suffix),
        (BinaryOptionName::ClientRootFolder, &definition.client_root_folder),
    ];

    let mut options = Vec::new();
    for (name, value) in binary {
        let Some(value) = value.as_deref().filter(|v| !v.is_empty() && *v != "no") else {
            continue;
        };
        let option = JdlOption::Binary(BinaryOption::new(name, value)?);
        if !option.is_valid() {
            warn!(entity = %definition.name, option = %name, value, "Skipping unsupported option value");
            continue;
        }
        options.push(option);
    }

    let unary = [
        (UnaryOptionName::Filter, definition.jpa_metamodel_filtering == Some(true)),
        (UnaryOptionName::NoFluentMethod, definition.fluent_methods == Some(false)),
        (UnaryOptionName::ReadOnly, definition.read_only == Some(true)),
    ];
    options.extend(
        unary
            .into_iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| JdlOption::Unary(UnaryOption::new(name))),
    );

    Ok(options
        .into_iter()
        .map(|option| option.with_entity_names([definition.name.as_str()]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{dto::OneOrMany, ports::MockEntityConfigStore};
    use crate::domain::ApplicationOverrides;

    fn relationship(kind: &str, name: &str, other: &str) -> RelationshipDefinition {
        RelationshipDefinition {
            relationship_type: kind.into(),
            relationship_name: name.into(),
            other_entity_name: other.into(),
            ..Default::default()
        }
    }

    fn store(
        entities: Vec<EntityDefinition>,
        application: Option<ApplicationOverrides>,
    ) -> MockEntityConfigStore {
        let mut store = MockEntityConfigStore::new();
        store
            .expect_list_entities()
            .returning(move || Ok(entities.clone()));
        store
            .expect_application()
            .returning(move || Ok(application.clone()));
        store
    }

    fn library() -> Vec<EntityDefinition> {
        let author = EntityDefinition {
            name: "Author".into(),
            fields: vec![FieldDefinition {
                field_name: "name".into(),
                field_type: "String".into(),
                field_validate_rules: vec!["required".into(), "maxlength".into()],
                field_validate_rules_maxlength: Some(50.into()),
                ..Default::default()
            }],
            relationships: vec![RelationshipDefinition {
                other_entity_relationship_name: Some("author".into()),
                ..relationship("one-to-many", "book", "book")
            }],
            dto: Some("mapstruct".into()),
            pagination: Some("no".into()),
            ..Default::default()
        };
        let book = EntityDefinition {
            name: "Book".into(),
            fields: vec![FieldDefinition {
                field_name: "language".into(),
                field_type: "Language".into(),
                field_values: Some("FRENCH,ENGLISH (en)".into()),
                ..Default::default()
            }],
            relationships: vec![RelationshipDefinition {
                other_entity_field: Some("name".into()),
                relationship_validate_rules: Some(OneOrMany::One("required".into())),
                ..relationship("many-to-one", "author", "author")
            }],
            dto: Some("mapstruct".into()),
            read_only: Some(true),
            ..Default::default()
        };
        vec![author, book]
    }

    #[test]
    fn imports_entities_fields_and_enums() {
        let service = ImportService::new(Box::new(store(library(), None)));
        let jdl = service.import().unwrap();

        assert_eq!(jdl.entity_names().collect::<Vec<_>>(), vec!["Author", "Book"]);
        let name = jdl.entity("Author").unwrap().field("name").unwrap();
        assert_eq!(name.validation_count(), 2);
        assert_eq!(
            jdl.enumeration("Language").unwrap().values_as_string(),
            "FRENCH,ENGLISH (en)"
        );
        assert_eq!(jdl.application_count(), 0);
    }

    #[test]
    fn keeps_one_side_of_bidirectional_relationships() {
        let service = ImportService::new(Box::new(store(library(), None)));
        let jdl = service.import().unwrap();

        assert_eq!(jdl.relationship_count(), 1);
        let rel = jdl.relationships().iter().next().unwrap();
        assert_eq!(rel.from(), "Author");
        assert_eq!(rel.to(), "Book");
        assert_eq!(rel.injected_field_in_from(), Some("book"));
        assert_eq!(rel.injected_field_in_to(), Some("author"));
    }

    #[test]
    fn unmatched_many_to_one_is_kept() {
        let entities = vec![
            EntityDefinition {
                name: "Book".into(),
                relationships: vec![RelationshipDefinition {
                    other_entity_field: Some("login".into()),
                    relationship_validate_rules: Some(OneOrMany::Many(vec!["required".into()])),
                    ..relationship("many-to-one", "owner", "user")
                }],
                ..Default::default()
            },
        ];
        let jdl = ImportService::new(Box::new(store(entities, None)))
            .import()
            .unwrap();
        let rel = jdl.relationships().iter().next().unwrap();
        assert_eq!(rel.to(), "User");
        assert_eq!(rel.injected_field_in_from(), Some("owner(login)"));
        assert!(rel.is_injected_field_in_from_required());
        assert_eq!(rel.injected_field_in_to(), None);
    }

    #[test]
    fn options_are_scoped_per_entity_and_merged() {
        let service = ImportService::new(Box::new(store(library(), None)));
        let jdl = service.import().unwrap();

        let dto = jdl.options().get("dto_mapstruct").unwrap();
        assert_eq!(dto.entity_names().collect::<Vec<_>>(), vec!["Author", "Book"]);
        assert!(jdl.options().has("readOnly"));
        assert!(!jdl.options().has("paginate"));
    }

    #[test]
    fn application_owns_every_imported_entity() {
        let overrides = ApplicationOverrides {
            base_name: Some("library".into()),
            ..Default::default()
        };
        let service = ImportService::new(Box::new(store(library(), Some(overrides))));
        let jdl = service.import().unwrap();

        let app = jdl.application("library").unwrap();
        assert!(app.has_entity_name("Author"));
        assert!(app.has_entity_name("Book"));
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = MockEntityConfigStore::new();
        store.expect_list_entities().returning(|| {
            Err(crate::application::ApplicationError::StoreUnreadable {
                path: ".jhipster".into(),
                reason: "denied".into(),
            }
            .into())
        });
        assert!(ImportService::new(Box::new(store)).import().is_err());
    }
}
