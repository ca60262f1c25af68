//! The `Entity` construct: a named, ordered set of fields mapped to a table.

use std::fmt;

use indexmap::IndexMap;

use crate::domain::{
    common::{non_blank, to_snake_case, write_comment},
    entities::field::Field,
    error::DomainError,
    validation::{ValidationIssue, check_name, is_reserved_entity_name},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    table_name: String,
    comment: Option<String>,
    fields: IndexMap<String, Field>,
}

impl Entity {
    /// Create an entity whose table name defaults to its own name.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "entity",
                field: "name",
            });
        }
        Ok(Self {
            table_name: name.clone(),
            name,
            comment: None,
            fields: IndexMap::new(),
        })
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Add a field, replacing any field with the same name.
    ///
    /// The error names both this entity and the offending field.
    pub fn add_field(&mut self, field: Field) -> Result<(), DomainError> {
        let errors = field.issues();
        if !errors.is_empty() {
            return Err(DomainError::InvalidField {
                entity: self.name.clone(),
                field: field.name().to_string(),
                errors,
            });
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(())
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether the table name is just the entity name in another casing.
    pub fn has_default_table_name(&self) -> bool {
        to_snake_case(&self.table_name) == to_snake_case(&self.name)
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        check_name(&self.name, &mut issues);
        if is_reserved_entity_name(&self.name) && !issues.contains(&ValidationIssue::ReservedKeyword) {
            issues.push(ValidationIssue::ReservedKeyword);
        }
        if self.table_name.trim().is_empty() {
            issues.push(ValidationIssue::NoTableName);
        }
        for field in self.fields.values().filter(|f| !f.is_valid()) {
            issues.push(ValidationIssue::InvalidField(field.name().to_string()));
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comment) = non_blank(self.comment.as_deref()) {
            write_comment(f, comment, "")?;
        }
        write!(f, "entity {}", self.name)?;
        if !self.has_default_table_name() {
            write!(f, " ({})", self.table_name)?;
        }
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str(" {\n")?;
        for (i, field) in self.fields.values().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            field.write_indented(f, "  ")?;
        }
        f.write_str("\n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::field::ValidationRule;

    #[test]
    fn renders_literal_scenario() {
        let mut entity = Entity::new("Abc")
            .unwrap()
            .with_table_name("String")
            .with_comment("comment");
        let mut my_field = Field::new("myField", "Integer")
            .unwrap()
            .with_comment("Field comment");
        my_field.add_validation(ValidationRule::default()).unwrap();
        entity.add_field(my_field).unwrap();
        entity
            .add_field(Field::new("myOtherField", "Long").unwrap())
            .unwrap();

        let expected = "/**\n * comment\n */\nentity Abc (String) {\n  /**\n   * Field comment\n   */\n  myField Integer required,\n  myOtherField Long\n}";
        assert_eq!(entity.to_string(), expected);
    }

    #[test]
    fn default_table_name_is_omitted() {
        let entity = Entity::new("JobHistory")
            .unwrap()
            .with_table_name("job_history");
        assert!(entity.has_default_table_name());
        assert_eq!(entity.to_string(), "entity JobHistory");
    }

    #[test]
    fn invalid_field_error_names_entity_and_field() {
        let mut entity = Entity::new("Book").unwrap();
        let err = entity
            .add_field(Field::new("class", "String").unwrap())
            .unwrap_err();
        match err {
            DomainError::InvalidField { entity, field, .. } => {
                assert_eq!(entity, "Book");
                assert_eq!(field, "class");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(entity.field_count(), 0);
    }

    #[test]
    fn fields_keep_insertion_order_and_overwrite_by_name() {
        let mut entity = Entity::new("Book").unwrap();
        entity.add_field(Field::new("title", "String").unwrap()).unwrap();
        entity.add_field(Field::new("pages", "Integer").unwrap()).unwrap();
        entity.add_field(Field::new("title", "TextBlob").unwrap()).unwrap();

        let names: Vec<_> = entity.fields().map(Field::name).collect();
        assert_eq!(names, vec!["title", "pages"]);
        assert_eq!(entity.field("title").unwrap().field_type(), "TextBlob");
    }

    #[test]
    fn reserved_entity_names_are_invalid() {
        let entity = Entity::new("User").unwrap();
        assert_eq!(entity.issues(), vec![ValidationIssue::ReservedKeyword]);
        let entity = Entity::new("Book").unwrap().with_table_name("");
        assert_eq!(entity.issues(), vec![ValidationIssue::NoTableName]);
    }
}
