//! Merging two JDL documents into a third.
//!
//! The merge clones the left document and folds every child of the right one
//! into the clone. Both inputs are only ever borrowed immutably.
//!
//! | Child | On key collision |
//! |-------|------------------|
//! | application, deployment, entity, enum | right replaces left |
//! | relationship | left kept, right dropped |
//! | option | entity scopes unioned |

use crate::domain::{
    entities::jdl_object::JdlObject, error::DomainError, validation::ValidationIssue,
};

/// What happened to colliding children during a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// `kind name` of every left child replaced by the right document.
    pub replaced: Vec<String>,
    /// Identity keys of right relationships dropped as duplicates.
    pub deduplicated_relationships: Vec<String>,
    /// Identities of options whose scopes were unioned.
    pub merged_options: Vec<String>,
}

impl MergeReport {
    pub fn is_clean(&self) -> bool {
        self.replaced.is_empty()
            && self.deduplicated_relationships.is_empty()
            && self.merged_options.is_empty()
    }
}

/// Merge `a` and `b` into a new document. Either input missing is an error.
pub fn merge_jdl_objects(
    a: Option<&JdlObject>,
    b: Option<&JdlObject>,
) -> Result<JdlObject, DomainError> {
    merge_with_report(a, b).map(|(merged, _)| merged)
}

/// [`merge_jdl_objects`], also reporting every collision.
pub fn merge_with_report(
    a: Option<&JdlObject>,
    b: Option<&JdlObject>,
) -> Result<(JdlObject, MergeReport), DomainError> {
    let (Some(a), Some(b)) = (a, b) else {
        return Err(DomainError::invalid(
            "JDL object",
            vec![ValidationIssue::NoJdlObject],
        ));
    };

    let mut merged = a.clone();
    let mut report = MergeReport::default();

    for (key, application) in &b.applications {
        if merged
            .applications
            .insert(key.clone(), application.clone())
            .is_some()
        {
            report.replaced.push(format!("application {key}"));
        }
    }
    for (key, deployment) in &b.deployments {
        if merged
            .deployments
            .insert(*key, deployment.clone())
            .is_some()
        {
            report.replaced.push(format!("deployment {key}"));
        }
    }
    for (key, entity) in &b.entities {
        if merged.entities.insert(key.clone(), entity.clone()).is_some() {
            report.replaced.push(format!("entity {key}"));
        }
    }
    for (key, enumeration) in &b.enums {
        if merged.enums.insert(key.clone(), enumeration.clone()).is_some() {
            report.replaced.push(format!("enum {key}"));
        }
    }
    for relationship in &b.relationships {
        if !merged.relationships.add(relationship.clone())? {
            report.deduplicated_relationships.push(relationship.id());
        }
    }
    for option in b.options.iter() {
        if !merged.options.add_option(option.clone())? {
            report.merged_options.push(option.identity());
        }
    }

    Ok((merged, report))
}

impl JdlObject {
    /// Merge `other` into a copy of `self`.
    pub fn merge(&self, other: &JdlObject) -> Result<JdlObject, DomainError> {
        merge_jdl_objects(Some(self), Some(other))
    }
}
