//! Document Service - builds, merges and validates JDL documents.
//!
//! The typical flow:
//! 1. Load construction parameters through a `DocumentSource`
//! 2. Build a `JdlObject` through the validating `add_*` path
//! 3. Merge several documents left to right
//! 4. Validate relationships and cross references before handing off

use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        dto::JdlDocument,
        ports::DocumentSource,
    },
    domain::{
        ApplicationConfig, ApplicationType, ConsistencyIssue, DeploymentConfig, DomainError,
        Entity, Enumeration, JdlObject, JdlOption, Relationship, RelationshipRepair,
        merge_with_report,
    },
    error::JdlResult,
};

/// Outcome of [`DocumentService::validate`].
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The document with every relationship repair applied.
    pub document: JdlObject,
    pub repairs: Vec<RelationshipRepair>,
    /// Relationship rule violations and unknown entity references.
    pub errors: Vec<DomainError>,
    pub consistency: Vec<ConsistencyIssue>,
    pub strict: bool,
}

impl ValidationReport {
    /// Errors always fail; in strict mode repairs and consistency issues fail too.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
            && (!self.strict || (self.repairs.is_empty() && self.consistency.is_empty()))
    }

    /// The corrected document, or a `ValidationFailed` error summarizing the report.
    pub fn into_result(self) -> JdlResult<JdlObject> {
        if self.is_valid() {
            return Ok(self.document);
        }
        let summary = format!(
            "{} error(s), {} repair(s), {} consistency issue(s)",
            self.errors.len(),
            self.repairs.len(),
            self.consistency.len()
        );
        Err(ApplicationError::ValidationFailed(summary).into())
    }
}

/// Builds, merges and validates documents.
pub struct DocumentService {
    source: Box<dyn DocumentSource>,
    default_application_type: ApplicationType,
}

impl DocumentService {
    /// Create a new document service reading through `source`.
    pub fn new(source: Box<dyn DocumentSource>) -> Self {
        Self {
            source,
            default_application_type: ApplicationType::default(),
        }
    }

    /// Application type used when a document's application does not name one.
    pub fn with_default_application_type(mut self, application_type: ApplicationType) -> Self {
        self.default_application_type = application_type;
        self
    }

    /// Load the document at `path` and build it.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> JdlResult<JdlObject> {
        let document = self.source.load(path)?;
        debug!(
            entities = document.entities.len(),
            relationships = document.relationships.len(),
            "Document loaded"
        );
        self.build(document)
    }

    /// Build a `JdlObject`, reporting every rejected construct at once.
    #[instrument(skip_all)]
    pub fn build(&self, document: JdlDocument) -> JdlResult<JdlObject> {
        let mut jdl = JdlObject::new();
        let mut errors = Vec::new();

        for params in document.entities {
            collect(&mut errors, Entity::try_from(params).and_then(|e| jdl.add_entity(e)));
        }
        for params in document.enums {
            collect(
                &mut errors,
                Enumeration::try_from(params).and_then(|e| jdl.add_enum(e)),
            );
        }
        for mut params in document.applications {
            params
                .config
                .application_type
                .get_or_insert(self.default_application_type);
            collect(&mut errors, jdl.add_application(ApplicationConfig::from(params)));
        }
        for params in document.deployments {
            collect(&mut errors, jdl.add_deployment(DeploymentConfig::from(params)));
        }
        for params in document.relationships {
            let added = Relationship::try_from(params).and_then(|r| {
                let id = r.id();
                jdl.add_relationship(r).map(|added| (id, added))
            });
            match added {
                Ok((id, false)) => debug!(%id, "Duplicate relationship ignored"),
                Ok(_) => {}
                Err(err) => errors.push(err),
            }
        }
        for params in document.options {
            collect(
                &mut errors,
                JdlOption::try_from(params).and_then(|o| jdl.add_option(o).map(drop)),
            );
        }

        if !errors.is_empty() {
            warn!(count = errors.len(), "Document has invalid constructs");
            return Err(ApplicationError::InvalidDocument { errors }.into());
        }

        info!(
            applications = jdl.application_count(),
            entities = jdl.entity_count(),
            enums = jdl.enum_count(),
            relationships = jdl.relationship_count(),
            options = jdl.option_count(),
            "Document built"
        );
        Ok(jdl)
    }

    /// Merge documents left to right. Later documents win on key collisions.
    #[instrument(skip_all, fields(count = documents.len()))]
    pub fn merge_all(&self, documents: Vec<JdlObject>) -> JdlResult<JdlObject> {
        let mut documents = documents.into_iter();
        let Some(mut merged) = documents.next() else {
            return Err(ApplicationError::NothingToMerge.into());
        };

        for next in documents {
            let (result, report) = merge_with_report(Some(&merged), Some(&next))?;
            for replaced in &report.replaced {
                info!(%replaced, "Replaced by later document");
            }
            for id in &report.deduplicated_relationships {
                debug!(%id, "Relationship deduplicated during merge");
            }
            for identity in &report.merged_options {
                debug!(%identity, "Option scopes unioned during merge");
            }
            merged = result;
        }

        info!(entities = merged.entity_count(), "Documents merged");
        Ok(merged)
    }

    /// Check relationships and cross references.
    #[instrument(skip_all, fields(strict = strict))]
    pub fn validate(&self, jdl: &JdlObject, strict: bool) -> JdlResult<ValidationReport> {
        let (document, repairs, errors) = match jdl.validate_relationships() {
            Ok((document, repairs)) => (document, repairs, Vec::new()),
            Err(errors) => (jdl.clone(), Vec::new(), errors),
        };
        for repair in &repairs {
            warn!(%repair, "Relationship repaired");
        }
        let consistency = document.check_consistency();
        for issue in &consistency {
            warn!(%issue, "Consistency issue");
        }

        let report = ValidationReport {
            document,
            repairs,
            errors,
            consistency,
            strict,
        };
        if report.is_valid() {
            info!("Document is valid");
        } else {
            warn!(errors = report.errors.len(), "Document is invalid");
        }
        Ok(report)
    }
}

fn collect(errors: &mut Vec<DomainError>, result: Result<(), DomainError>) {
    if let Err(err) = result {
        errors.push(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JdlError;
    use crate::application::{
        dto::{EntityParams, OptionParams, RelationshipParams},
        ports::MockDocumentSource,
    };

    fn service() -> DocumentService {
        DocumentService::new(Box::new(MockDocumentSource::new()))
    }

    fn entity(name: &str) -> EntityParams {
        EntityParams {
            name: name.into(),
            ..Default::default()
        }
    }

    fn one_to_many(from: &str, to: &str) -> RelationshipParams {
        RelationshipParams {
            from: from.into(),
            to: to.into(),
            relationship_type: "OneToMany".into(),
            injected_field_in_from: Some("children".into()),
            ..Default::default()
        }
    }

    #[test]
    fn load_reads_through_the_port() {
        let mut source = MockDocumentSource::new();
        source
            .expect_load()
            .withf(|p| p == Path::new("doc.json"))
            .times(1)
            .returning(|_| {
                Ok(JdlDocument {
                    entities: vec![EntityParams {
                        name: "A".into(),
                        ..Default::default()
                    }],
                    ..Default::default()
                })
            });
        let service = DocumentService::new(Box::new(source));
        let jdl = service.load(Path::new("doc.json")).unwrap();
        assert_eq!(jdl.entity_count(), 1);
    }

    #[test]
    fn build_reports_every_invalid_construct() {
        let document = JdlDocument {
            entities: vec![entity("class"), entity("Good")],
            options: vec![OptionParams {
                name: "nope".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = service().build(document).unwrap_err();
        match err {
            JdlError::Application(ApplicationError::InvalidDocument { errors }) => {
                assert_eq!(errors.len(), 2)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_uses_default_application_type() {
        let document = JdlDocument {
            applications: vec![Default::default()],
            ..Default::default()
        };
        let jdl = service()
            .with_default_application_type(ApplicationType::Gateway)
            .build(document)
            .unwrap();
        let app = jdl.applications().next().unwrap();
        assert_eq!(app.application_type(), ApplicationType::Gateway);
    }

    #[test]
    fn merge_all_requires_a_document() {
        let err = service().merge_all(Vec::new()).unwrap_err();
        assert_eq!(err, JdlError::Application(ApplicationError::NothingToMerge));
    }

    #[test]
    fn merge_all_folds_left_to_right() {
        let svc = service();
        let docs = ["A", "B", "C"]
            .into_iter()
            .map(|name| {
                svc.build(JdlDocument {
                    entities: vec![entity(name)],
                    ..Default::default()
                })
                .unwrap()
            })
            .collect();
        let merged = svc.merge_all(docs).unwrap();
        assert_eq!(merged.entity_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn strict_validation_rejects_repairs() {
        let svc = service();
        let jdl = svc
            .build(JdlDocument {
                entities: vec![entity("Parent"), entity("Child")],
                relationships: vec![one_to_many("Parent", "Child")],
                ..Default::default()
            })
            .unwrap();

        let lenient = svc.validate(&jdl, false).unwrap();
        assert_eq!(lenient.repairs.len(), 1);
        assert!(lenient.is_valid());

        let strict = svc.validate(&jdl, true).unwrap();
        assert!(!strict.is_valid());
        assert!(matches!(
            strict.into_result(),
            Err(JdlError::Application(ApplicationError::ValidationFailed(_)))
        ));
    }

    #[test]
    fn validation_reports_unknown_entities() {
        let svc = service();
        let jdl = svc
            .build(JdlDocument {
                entities: vec![entity("Parent")],
                relationships: vec![one_to_many("Parent", "Ghost")],
                ..Default::default()
            })
            .unwrap();
        let report = svc.validate(&jdl, false).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(!report.is_valid());
    }
}
