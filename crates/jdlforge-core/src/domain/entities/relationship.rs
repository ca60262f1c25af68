//! Relationships between two entities.
//!
//! Construction enforces the existence invariant (a cardinality, both entity
//! names and at least one injected field). [`Relationship::validate`] applies
//! the per-cardinality rules later, once all entities are known.
//!
//! # Purity
//!
//! `validate` never mutates. A One-to-Many with a missing side comes back as a
//! corrected copy plus the list of repairs that produced it, so the caller
//! decides whether to log, accept or reject them.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::domain::{
    common::{lower_first, non_blank, write_comment},
    error::DomainError,
    validation::ValidationIssue,
    value_objects::RelationshipType,
};

// ── Relationship ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    relationship_type: RelationshipType,
    from: String,
    to: String,
    injected_field_in_from: Option<String>,
    injected_field_in_to: Option<String>,
    injected_field_in_from_required: bool,
    injected_field_in_to_required: bool,
    comment_in_from: Option<String>,
    comment_in_to: Option<String>,
    options: IndexMap<String, String>,
}

impl Relationship {
    pub fn builder(
        relationship_type: RelationshipType,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> RelationshipBuilder {
        RelationshipBuilder::new(relationship_type, from.into(), to.into())
    }

    pub const fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn injected_field_in_from(&self) -> Option<&str> {
        self.injected_field_in_from.as_deref()
    }

    pub fn injected_field_in_to(&self) -> Option<&str> {
        self.injected_field_in_to.as_deref()
    }

    pub const fn is_injected_field_in_from_required(&self) -> bool {
        self.injected_field_in_from_required
    }

    pub const fn is_injected_field_in_to_required(&self) -> bool {
        self.injected_field_in_to_required
    }

    pub fn comment_in_from(&self) -> Option<&str> {
        self.comment_in_from.as_deref()
    }

    pub fn comment_in_to(&self) -> Option<&str> {
        self.comment_in_to.as_deref()
    }

    /// Identity key used for deduplication: `Type_From{injectedFieldInFrom}_To`.
    ///
    /// The destination's injected field is not part of the key.
    pub fn id(&self) -> String {
        match &self.injected_field_in_from {
            Some(field) => format!(
                "{}_{}{{{}}}_{}",
                self.relationship_type, self.from, field, self.to
            ),
            None => format!("{}_{}_{}", self.relationship_type, self.from, self.to),
        }
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Relationship-level options (e.g. `jpaDerivedIdentifier`) in insertion order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.from.trim().is_empty() {
            issues.push(ValidationIssue::NoSourceEntity);
        }
        if self.to.trim().is_empty() {
            issues.push(ValidationIssue::NoDestinationEntity);
        }
        if self.injected_field_in_from.is_none() && self.injected_field_in_to.is_none() {
            issues.push(ValidationIssue::NoInjectedField);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// Apply the cardinality rules.
    ///
    /// - One-to-One: the source side must carry the injected field.
    /// - One-to-Many: a missing side is filled with the other entity's name,
    ///   lower-camel-cased.
    /// - Many-to-One: unidirectional only.
    /// - Many-to-Many: bidirectional only.
    pub fn validate(&self) -> Result<RelationshipValidation<'_>, DomainError> {
        let from_side = self.injected_field_in_from.is_some();
        let to_side = self.injected_field_in_to.is_some();

        match self.relationship_type {
            RelationshipType::OneToOne if !from_side => Err(self.rule_error(
                "the source entity must possess the destination, or you must invert the direction of the relationship",
            )),
            RelationshipType::ManyToOne if from_side && to_side => Err(self.rule_error(
                "only unidirectionality is supported, you should create a bidirectional One-to-Many relationship instead",
            )),
            RelationshipType::ManyToMany if !(from_side && to_side) => {
                Err(self.rule_error("only bidirectionality is supported"))
            }
            RelationshipType::OneToMany if from_side != to_side => {
                let (side, injected_field) = if from_side {
                    (RelationshipSide::To, lower_first(&self.from))
                } else {
                    (RelationshipSide::From, lower_first(&self.to))
                };
                let mut repaired = self.clone();
                match side {
                    RelationshipSide::From => {
                        repaired.injected_field_in_from = Some(injected_field.clone())
                    }
                    RelationshipSide::To => {
                        repaired.injected_field_in_to = Some(injected_field.clone())
                    }
                }
                Ok(RelationshipValidation {
                    relationship: Cow::Owned(repaired),
                    repairs: vec![RelationshipRepair {
                        relationship_id: self.id(),
                        side,
                        injected_field,
                    }],
                })
            }
            _ => Ok(RelationshipValidation {
                relationship: Cow::Borrowed(self),
                repairs: Vec::new(),
            }),
        }
    }

    fn rule_error(&self, reason: &str) -> DomainError {
        DomainError::RelationshipRule {
            kind: self.relationship_type,
            from: self.from.clone(),
            to: self.to.clone(),
            reason: reason.to_string(),
        }
    }

    /// Write `From{field} to To{field}` with per-side comments, prefixed by `indent`.
    pub(crate) fn write_body(&self, f: &mut impl fmt::Write, indent: &str) -> fmt::Result {
        if let Some(comment) = non_blank(self.comment_in_from.as_deref()) {
            write_comment(f, comment, indent)?;
        }
        write!(f, "{indent}")?;
        write_side(
            f,
            &self.from,
            self.injected_field_in_from.as_deref(),
            self.injected_field_in_from_required,
        )?;
        f.write_str(" to")?;
        match non_blank(self.comment_in_to.as_deref()) {
            Some(comment) => {
                f.write_char('\n')?;
                write_comment(f, comment, indent)?;
                write!(f, "{indent}")?;
            }
            None => f.write_char(' ')?,
        }
        write_side(
            f,
            &self.to,
            self.injected_field_in_to.as_deref(),
            self.injected_field_in_to_required,
        )?;
        for (name, value) in &self.options {
            if value.is_empty() || value == "true" {
                write!(f, " with {name}")?;
            } else {
                write!(f, " with {name}({value})")?;
            }
        }
        Ok(())
    }
}

fn write_side(
    f: &mut impl fmt::Write,
    entity: &str,
    injected_field: Option<&str>,
    required: bool,
) -> fmt::Result {
    f.write_str(entity)?;
    match injected_field {
        Some(field) if required => write!(f, "{{{field} required}}"),
        Some(field) => write!(f, "{{{field}}}"),
        None => Ok(()),
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "relationship {} {{", self.relationship_type)?;
        self.write_body(f, "  ")?;
        f.write_str("\n}")
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RelationshipBuilder {
    inner: Relationship,
}

impl RelationshipBuilder {
    fn new(relationship_type: RelationshipType, from: String, to: String) -> Self {
        Self {
            inner: Relationship {
                relationship_type,
                from,
                to,
                injected_field_in_from: None,
                injected_field_in_to: None,
                injected_field_in_from_required: false,
                injected_field_in_to_required: false,
                comment_in_from: None,
                comment_in_to: None,
                options: IndexMap::new(),
            },
        }
    }

    /// Blank names are treated as absent.
    pub fn injected_field_in_from(mut self, field: impl Into<String>) -> Self {
        self.inner.injected_field_in_from = present(field.into());
        self
    }

    pub fn injected_field_in_to(mut self, field: impl Into<String>) -> Self {
        self.inner.injected_field_in_to = present(field.into());
        self
    }

    pub fn injected_field_in_from_required(mut self, required: bool) -> Self {
        self.inner.injected_field_in_from_required = required;
        self
    }

    pub fn injected_field_in_to_required(mut self, required: bool) -> Self {
        self.inner.injected_field_in_to_required = required;
        self
    }

    pub fn comment_in_from(mut self, comment: impl Into<String>) -> Self {
        self.inner.comment_in_from = present(comment.into());
        self
    }

    pub fn comment_in_to(mut self, comment: impl Into<String>) -> Self {
        self.inner.comment_in_to = present(comment.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.options.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Relationship, DomainError> {
        let r = self.inner;
        if r.from.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "relationship",
                field: "source entity",
            });
        }
        if r.to.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                kind: "relationship",
                field: "destination entity",
            });
        }
        if r.injected_field_in_from.is_none() && r.injected_field_in_to.is_none() {
            return Err(DomainError::IncompleteRelationship {
                from: r.from,
                to: r.to,
            });
        }
        Ok(r)
    }
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ── Validation outcome ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipSide {
    From,
    To,
}

impl fmt::Display for RelationshipSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::From => "source",
            Self::To => "destination",
        })
    }
}

/// A field name filled in by [`Relationship::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRepair {
    pub relationship_id: String,
    pub side: RelationshipSide,
    pub injected_field: String,
}

impl fmt::Display for RelationshipRepair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} injected field defaulted to '{}'",
            self.relationship_id, self.side, self.injected_field
        )
    }
}

/// Result of [`Relationship::validate`]: borrowed when untouched, owned when repaired.
#[derive(Debug, Clone)]
pub struct RelationshipValidation<'a> {
    pub relationship: Cow<'a, Relationship>,
    pub repairs: Vec<RelationshipRepair>,
}

impl RelationshipValidation<'_> {
    pub fn is_repaired(&self) -> bool {
        !self.repairs.is_empty()
    }

    pub fn into_owned(self) -> (Relationship, Vec<RelationshipRepair>) {
        (self.relationship.into_owned(), self.repairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        ty: RelationshipType,
        from_field: Option<&str>,
        to_field: Option<&str>,
    ) -> Relationship {
        let mut b = Relationship::builder(ty, "JobHistory", "Department");
        if let Some(f) = from_field {
            b = b.injected_field_in_from(f);
        }
        if let Some(f) = to_field {
            b = b.injected_field_in_to(f);
        }
        b.build().unwrap()
    }

    // ── construction ─────────────────────────────────────────────────────────

    #[test]
    fn requires_an_injected_field() {
        let err = Relationship::builder(RelationshipType::OneToOne, "A", "B")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompleteRelationship { .. }));
    }

    #[test]
    fn requires_both_entities() {
        let err = Relationship::builder(RelationshipType::OneToOne, "", "B")
            .injected_field_in_from("b")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingRequiredField { .. }));
    }

    #[test]
    fn id_ignores_destination_field() {
        let r = build(RelationshipType::OneToMany, Some("dept"), Some("history"));
        assert_eq!(r.id(), "OneToMany_JobHistory{dept}_Department");
        let r = build(RelationshipType::ManyToOne, None, Some("history"));
        assert_eq!(r.id(), "ManyToOne_JobHistory_Department");
    }

    // ── validate ─────────────────────────────────────────────────────────────

    #[test]
    fn one_to_many_repairs_missing_destination_field() {
        let r = build(RelationshipType::OneToMany, Some("department"), None);
        let outcome = r.validate().unwrap();
        assert!(outcome.is_repaired());
        assert_eq!(
            outcome.relationship.injected_field_in_to(),
            Some("jobHistory")
        );
        assert_eq!(outcome.repairs[0].side, RelationshipSide::To);
        // The original is untouched.
        assert_eq!(r.injected_field_in_to(), None);
    }

    #[test]
    fn one_to_many_repairs_missing_source_field() {
        let r = build(RelationshipType::OneToMany, None, Some("jobHistory"));
        let (repaired, repairs) = r.validate().unwrap().into_owned();
        assert_eq!(repaired.injected_field_in_from(), Some("department"));
        assert_eq!(repairs.len(), 1);
    }

    #[test]
    fn complete_relationship_is_borrowed() {
        let r = build(RelationshipType::OneToMany, Some("a"), Some("b"));
        let outcome = r.validate().unwrap();
        assert!(matches!(outcome.relationship, Cow::Borrowed(_)));
    }

    #[test]
    fn one_to_one_needs_owner_on_source() {
        let r = build(RelationshipType::OneToOne, None, Some("history"));
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("invert the direction"));
        assert!(build(RelationshipType::OneToOne, Some("d"), None).validate().is_ok());
    }

    #[test]
    fn many_to_one_rejects_bidirectional() {
        let r = build(RelationshipType::ManyToOne, Some("a"), Some("b"));
        assert!(r.validate().is_err());
        assert!(build(RelationshipType::ManyToOne, Some("a"), None).validate().is_ok());
    }

    #[test]
    fn many_to_many_requires_both_sides() {
        assert!(build(RelationshipType::ManyToMany, Some("a"), None).validate().is_err());
        assert!(build(RelationshipType::ManyToMany, None, Some("b")).validate().is_err());
        assert!(build(RelationshipType::ManyToMany, Some("a"), Some("b")).validate().is_ok());
    }

    // ── rendering ────────────────────────────────────────────────────────────

    #[test]
    fn renders_required_side_and_options() {
        let r = Relationship::builder(RelationshipType::OneToOne, "Car", "Driver")
            .injected_field_in_from("driver")
            .injected_field_in_from_required(true)
            .option("jpaDerivedIdentifier", "true")
            .build()
            .unwrap();
        assert_eq!(
            r.to_string(),
            "relationship OneToOne {\n  Car{driver required} to Driver with jpaDerivedIdentifier\n}"
        );
        assert!(r.has_option("jpaDerivedIdentifier"));
    }

    #[test]
    fn renders_side_comments() {
        let r = Relationship::builder(RelationshipType::ManyToOne, "Car", "Owner")
            .injected_field_in_from("owner")
            .comment_in_from("who owns it")
            .comment_in_to("cars")
            .build()
            .unwrap();
        assert_eq!(
            r.to_string(),
            "relationship ManyToOne {\n  /**\n   * who owns it\n   */\n  Car{owner} to\n  /**\n   * cars\n   */\n  Owner\n}"
        );
    }
}
