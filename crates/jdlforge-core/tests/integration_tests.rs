//! Integration tests for jdlforge-core.

use jdlforge_core::{
    application::{
        DocumentService, EntityParams, EnumParams, EnumValueParams, FieldParams, JdlDocument,
        OptionParams, RelationshipParams,
        ports::DocumentSource,
    },
    domain::{
        ApplicationConfig, ApplicationOverrides, Entity, Enumeration, Field, JdlObject, JdlOption,
        OptionCollection, Relationship, RelationshipType, merge_jdl_objects,
    },
    error::JdlResult,
};
use std::path::Path;

/// Source that hands back one fixed document.
struct StaticSource(JdlDocument);

impl DocumentSource for StaticSource {
    fn load(&self, _path: &Path) -> JdlResult<JdlDocument> {
        Ok(self.0.clone())
    }
}

fn shop() -> JdlObject {
    let mut jdl = JdlObject::new();

    let mut product = Entity::new("Product").unwrap().with_comment("Sold item");
    product
        .add_field(Field::new("title", "String").unwrap())
        .unwrap();
    product
        .add_field(Field::new("status", "Status").unwrap())
        .unwrap();
    jdl.add_entity(product).unwrap();
    jdl.add_entity(Entity::new("Category").unwrap()).unwrap();

    jdl.add_enum(
        Enumeration::new("Status")
            .unwrap()
            .with_value("AVAILABLE", None)
            .with_value("SOLD_OUT", Some("gone")),
    )
    .unwrap();

    jdl.add_relationship(
        Relationship::builder(RelationshipType::ManyToMany, "Product", "Category")
            .injected_field_in_from("category")
            .injected_field_in_to("product")
            .build()
            .unwrap(),
    )
    .unwrap();

    jdl.add_option(JdlOption::parse("dto", Some("mapstruct")).unwrap().with_entity_names(["Product"]))
        .unwrap();
    jdl.add_application(ApplicationConfig::monolith(ApplicationOverrides {
        base_name: Some("shop".into()),
        ..Default::default()
    }))
    .unwrap();
    jdl
}

fn blog() -> JdlObject {
    let mut jdl = JdlObject::new();
    jdl.add_entity(Entity::new("Post").unwrap()).unwrap();
    jdl.add_entity(Entity::new("Tag").unwrap()).unwrap();
    jdl.add_enum(Enumeration::new("Visibility").unwrap().with_value("PUBLIC", None))
        .unwrap();
    jdl.add_relationship(
        Relationship::builder(RelationshipType::ManyToOne, "Post", "Tag")
            .injected_field_in_from("tag")
            .build()
            .unwrap(),
    )
    .unwrap();
    jdl.add_option(JdlOption::parse("readOnly", None).unwrap().with_entity_names(["Tag"]))
        .unwrap();
    jdl
}

#[test]
fn merge_never_mutates_inputs() {
    let a = shop();
    let b = blog();
    let (a_before, b_before) = (a.to_string(), b.to_string());

    let merged = merge_jdl_objects(Some(&a), Some(&b)).unwrap();

    assert_eq!(a.to_string(), a_before);
    assert_eq!(b.to_string(), b_before);
    assert_ne!(merged.to_string(), a_before);
}

#[test]
fn merge_counts_add_up_without_overlap() {
    let a = shop();
    let b = blog();
    let merged = a.merge(&b).unwrap();

    assert_eq!(merged.entity_count(), a.entity_count() + b.entity_count());
    assert_eq!(merged.enum_count(), a.enum_count() + b.enum_count());
    assert_eq!(
        merged.relationship_count(),
        a.relationship_count() + b.relationship_count()
    );
    assert_eq!(merged.option_count(), a.option_count() + b.option_count());
    assert_eq!(merged.application_count(), 1);
}

#[test]
fn merge_with_self_is_stable() {
    let a = shop();
    let merged = a.merge(&a).unwrap();
    assert_eq!(merged.to_string(), a.to_string());
}

#[test]
fn option_identity_is_added_once() {
    let mut options = OptionCollection::new();
    options
        .add_option(JdlOption::parse("service", Some("serviceClass")).unwrap().with_entity_names(["A"]))
        .unwrap();
    options
        .add_option(
            JdlOption::parse("service", Some("serviceClass"))
                .unwrap()
                .with_entity_names(["B"])
                .with_excluded_names(["C"]),
        )
        .unwrap();
    options
        .add_option(JdlOption::parse("service", Some("serviceImpl")).unwrap())
        .unwrap();

    assert_eq!(options.len(), 2);
    let merged = options.get("service_serviceClass").unwrap();
    assert_eq!(merged.entity_names().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(merged.excluded_names().collect::<Vec<_>>(), vec!["C"]);
    assert_eq!(options.options_for_name("service").count(), 2);
}

#[test]
fn entity_replaced_on_collision() {
    let mut jdl = JdlObject::new();
    jdl.add_entity(Entity::new("A").unwrap().with_comment("first"))
        .unwrap();
    jdl.add_entity(Entity::new("A").unwrap().with_comment("second"))
        .unwrap();
    assert_eq!(jdl.entity_count(), 1);
    assert_eq!(jdl.entity("A").unwrap().comment(), Some("second"));
}

#[test]
fn document_pipeline_builds_merges_and_validates() {
    let first = JdlDocument {
        entities: vec![
            EntityParams {
                name: "Author".into(),
                fields: vec![FieldParams {
                    name: "language".into(),
                    field_type: "Language".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            EntityParams {
                name: "Book".into(),
                ..Default::default()
            },
        ],
        enums: vec![EnumParams {
            name: "Language".into(),
            values: vec![EnumValueParams {
                key: "FRENCH".into(),
                value: None,
            }],
            ..Default::default()
        }],
        relationships: vec![RelationshipParams {
            from: "Author".into(),
            to: "Book".into(),
            relationship_type: "OneToMany".into(),
            injected_field_in_from: Some("book".into()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let second = JdlDocument {
        options: vec![OptionParams {
            name: "paginate".into(),
            value: Some("pagination".into()),
            entity_names: vec!["Book".into()],
            ..Default::default()
        }],
        ..Default::default()
    };

    let service = DocumentService::new(Box::new(StaticSource(first)));
    let a = service.load(Path::new("first.json")).unwrap();
    let b = service.build(second).unwrap();
    let merged = service.merge_all(vec![a, b]).unwrap();

    let report = service.validate(&merged, false).unwrap();
    assert!(report.is_valid());
    assert!(report.consistency.is_empty());
    assert_eq!(report.repairs.len(), 1);

    let text = report.into_result().unwrap().to_string();
    assert!(text.contains("Author{book} to Book{author}"));
    assert!(text.contains("paginate Book with pagination"));
}
