//! Construction-parameter records.
//!
//! Two families live here:
//!
//! - **Document records** (`JdlDocument` and friends): plain data already
//!   parsed from JDL text or built by a prompt flow. Each converts into its
//!   domain construct with `TryFrom`, running the construct's own invariants.
//! - **Generator config records** (`EntityDefinition` and friends): the
//!   `.jhipster/<Entity>.json` files, consumed by `ImportService`.
//!
//! All records use camelCase keys and tolerate missing optional keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicationConfig, ApplicationOverrides, DeploymentConfig, DeploymentOverrides, DomainError,
    Entity, Enumeration, Field, JdlOption, Relationship, RelationshipType, RuleValue,
    ValidationRule, ValidationRuleName,
};

// ============================================================================
// Document records
// ============================================================================

/// A whole document's worth of construction parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JdlDocument {
    pub applications: Vec<ApplicationParams>,
    pub deployments: Vec<DeploymentParams>,
    pub entities: Vec<EntityParams>,
    pub enums: Vec<EnumParams>,
    pub relationships: Vec<RelationshipParams>,
    pub options: Vec<OptionParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationParams {
    pub name: ValidationRuleName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
}

impl From<ValidationParams> for ValidationRule {
    fn from(params: ValidationParams) -> Self {
        match params.value {
            Some(value) => ValidationRule::with_value(params.name, value),
            None => ValidationRule::new(params.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldParams {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub validations: Vec<ValidationParams>,
}

impl TryFrom<FieldParams> for Field {
    type Error = DomainError;

    fn try_from(params: FieldParams) -> Result<Self, Self::Error> {
        let mut field = Field::new(params.name, params.field_type)?;
        if let Some(comment) = params.comment {
            field = field.with_comment(comment);
        }
        for rule in params.validations {
            field.add_validation(rule.into())?;
        }
        Ok(field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub fields: Vec<FieldParams>,
}

impl TryFrom<EntityParams> for Entity {
    type Error = DomainError;

    fn try_from(params: EntityParams) -> Result<Self, Self::Error> {
        let mut entity = Entity::new(params.name)?;
        if let Some(table_name) = params.table_name {
            entity = entity.with_table_name(table_name);
        }
        if let Some(comment) = params.comment {
            entity = entity.with_comment(comment);
        }
        for field in params.fields {
            entity.add_field(field.try_into()?)?;
        }
        Ok(entity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumValueParams {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub values: Vec<EnumValueParams>,
}

impl TryFrom<EnumParams> for Enumeration {
    type Error = DomainError;

    fn try_from(params: EnumParams) -> Result<Self, Self::Error> {
        let mut enumeration = Enumeration::new(params.name)?;
        if let Some(comment) = params.comment {
            enumeration = enumeration.with_comment(comment);
        }
        for value in params.values {
            enumeration.add_value(value.key, value.value.as_deref());
        }
        Ok(enumeration)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipParams {
    pub from: String,
    pub to: String,
    /// Parsed on conversion; an unknown cardinality is rejected there.
    #[serde(rename = "type")]
    pub relationship_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injected_field_in_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injected_field_in_to: Option<String>,
    #[serde(rename = "isInjectedFieldInFromRequired")]
    pub injected_field_in_from_required: bool,
    #[serde(rename = "isInjectedFieldInToRequired")]
    pub injected_field_in_to_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_in_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_in_to: Option<String>,
    pub options: IndexMap<String, String>,
}

impl TryFrom<RelationshipParams> for Relationship {
    type Error = DomainError;

    fn try_from(params: RelationshipParams) -> Result<Self, Self::Error> {
        let relationship_type: RelationshipType = params.relationship_type.parse()?;
        let mut builder = Relationship::builder(relationship_type, params.from, params.to)
            .injected_field_in_from_required(params.injected_field_in_from_required)
            .injected_field_in_to_required(params.injected_field_in_to_required);
        if let Some(field) = params.injected_field_in_from {
            builder = builder.injected_field_in_from(field);
        }
        if let Some(field) = params.injected_field_in_to {
            builder = builder.injected_field_in_to(field);
        }
        if let Some(comment) = params.comment_in_from {
            builder = builder.comment_in_from(comment);
        }
        if let Some(comment) = params.comment_in_to {
            builder = builder.comment_in_to(comment);
        }
        for (name, value) in params.options {
            builder = builder.option(name, value);
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub entity_names: Vec<String>,
    pub excluded_names: Vec<String>,
}

impl TryFrom<OptionParams> for JdlOption {
    type Error = DomainError;

    fn try_from(params: OptionParams) -> Result<Self, Self::Error> {
        Ok(JdlOption::parse(&params.name, params.value.as_deref())?
            .with_entity_names(params.entity_names)
            .with_excluded_names(params.excluded_names))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationParams {
    pub config: ApplicationOverrides,
    pub entity_names: Vec<String>,
}

impl From<ApplicationParams> for ApplicationConfig {
    fn from(params: ApplicationParams) -> Self {
        ApplicationConfig::new(params.config).with_entity_names(params.entity_names)
    }
}

/// Deployment parameters are the overridable settings themselves.
pub type DeploymentParams = DeploymentOverrides;

impl From<DeploymentParams> for DeploymentConfig {
    fn from(params: DeploymentParams) -> Self {
        DeploymentConfig::new(params)
    }
}

// ============================================================================
// Generator config records (.jhipster/<Entity>.json)
// ============================================================================

/// A string or a list of strings, as generator files write either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::One(s) => s == needle,
            Self::Many(list) => list.iter().any(|s| s == needle),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
    pub field_name: String,
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    /// Comma-separated constants when `field_type` names an enum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_values: Option<String>,
    pub field_validate_rules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_min: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_max: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_minlength: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_maxlength: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_pattern: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_minbytes: Option<RuleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_validate_rules_maxbytes: Option<RuleValue>,
}

impl FieldDefinition {
    /// The value stored alongside a validation rule, if any.
    pub fn rule_value(&self, rule: ValidationRuleName) -> Option<&RuleValue> {
        match rule {
            ValidationRuleName::Required | ValidationRuleName::Unique => None,
            ValidationRuleName::Min => self.field_validate_rules_min.as_ref(),
            ValidationRuleName::Max => self.field_validate_rules_max.as_ref(),
            ValidationRuleName::MinLength => self.field_validate_rules_minlength.as_ref(),
            ValidationRuleName::MaxLength => self.field_validate_rules_maxlength.as_ref(),
            ValidationRuleName::Pattern => self.field_validate_rules_pattern.as_ref(),
            ValidationRuleName::MinBytes => self.field_validate_rules_minbytes.as_ref(),
            ValidationRuleName::MaxBytes => self.field_validate_rules_maxbytes.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipDefinition {
    /// `one-to-one`, `one-to-many`, `many-to-one` or `many-to-many`.
    pub relationship_type: String,
    pub relationship_name: String,
    pub other_entity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_entity_relationship_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_side: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_validate_rules: Option<OneOrMany>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(rename = "useJPADerivedIdentifier", skip_serializing_if = "Option::is_none")]
    pub use_jpa_derived_identifier: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDefinition {
    /// Taken from the file stem when the file itself does not say.
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub relationships: Vec<RelationshipDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javadoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(rename = "angularJSSuffix", skip_serializing_if = "Option::is_none")]
    pub angular_js_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_root_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jpa_metamodel_filtering: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluent_methods: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_deserializes_with_defaults() {
        let doc: JdlDocument = serde_json::from_str(
            r#"{
                "entities": [{
                    "name": "Book",
                    "fields": [{"name": "title", "type": "String",
                                "validations": [{"name": "required"}, {"name": "maxlength", "value": 64}]}]
                }],
                "relationships": [{"from": "Book", "to": "Author", "type": "ManyToOne",
                                   "injectedFieldInFrom": "author", "isInjectedFieldInFromRequired": true}]
            }"#,
        )
        .unwrap();
        assert!(doc.applications.is_empty());

        let entity = Entity::try_from(doc.entities[0].clone()).unwrap();
        assert_eq!(entity.to_string(), "entity Book {\n  title String required maxlength(64)\n}");

        let rel = Relationship::try_from(doc.relationships[0].clone()).unwrap();
        assert!(rel.is_injected_field_in_from_required());
    }

    #[test]
    fn wrong_relationship_type_is_rejected() {
        let params = RelationshipParams {
            from: "A".into(),
            to: "B".into(),
            relationship_type: "OneToSome".into(),
            injected_field_in_from: Some("b".into()),
            ..Default::default()
        };
        assert!(matches!(
            Relationship::try_from(params),
            Err(DomainError::UnknownValue { kind: "relationship type", .. })
        ));
    }

    #[test]
    fn missing_validation_value_fails_field_conversion() {
        let params = FieldParams {
            name: "age".into(),
            field_type: "Integer".into(),
            validations: vec![ValidationParams {
                name: ValidationRuleName::Min,
                value: None,
            }],
            ..Default::default()
        };
        assert!(matches!(
            Field::try_from(params),
            Err(DomainError::InvalidValidation { .. })
        ));
    }

    #[test]
    fn option_params_keep_scope() {
        let option = JdlOption::try_from(OptionParams {
            name: "dto".into(),
            value: Some("mapstruct".into()),
            entity_names: vec!["D".into()],
            excluded_names: vec!["A".into()],
        })
        .unwrap();
        assert_eq!(option.to_string(), "dto D with mapstruct except A");
    }

    #[test]
    fn generator_definition_reads_jhipster_keys() {
        let def: EntityDefinition = serde_json::from_str(
            r#"{
                "fields": [{"fieldName": "name", "fieldType": "String",
                            "fieldValidateRules": ["required", "minlength"],
                            "fieldValidateRulesMinlength": 3}],
                "relationships": [{"relationshipType": "many-to-one", "relationshipName": "author",
                                   "otherEntityName": "author", "otherEntityField": "name",
                                   "relationshipValidateRules": "required"}],
                "angularJSSuffix": "mySuffix",
                "fluentMethods": false
            }"#,
        )
        .unwrap();
        assert_eq!(
            def.fields[0].rule_value(ValidationRuleName::MinLength),
            Some(&RuleValue::Integer(3))
        );
        assert!(
            def.relationships[0]
                .relationship_validate_rules
                .as_ref()
                .unwrap()
                .contains("required")
        );
        assert_eq!(def.angular_js_suffix.as_deref(), Some("mySuffix"));
        assert_eq!(def.fluent_methods, Some(false));
    }
}
