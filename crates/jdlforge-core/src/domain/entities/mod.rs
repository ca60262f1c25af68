pub mod application;
pub mod deployment;
pub mod entity;
pub mod enumeration;
pub mod field;
pub mod jdl_object;
pub mod merge;
pub mod option;
pub mod option_collection;
pub mod relationship;
pub mod relationship_collection;

pub use crate::domain::DomainError;
pub use application::{ApplicationConfig, ApplicationOverrides, ApplicationSettings};
pub use deployment::{DeploymentConfig, DeploymentOverrides};
pub use entity::Entity;
pub use enumeration::{EnumValue, Enumeration};
pub use field::{Field, RuleValue, ValidationRule};
pub use jdl_object::{BUILT_IN_USER_ENTITY, ConsistencyIssue, JdlObject};
pub use merge::{MergeReport, merge_jdl_objects, merge_with_report};
pub use option::{BinaryOption, JdlOption, OptionScope, UnaryOption};
pub use option_collection::OptionCollection;
pub use relationship::{
    Relationship, RelationshipBuilder, RelationshipRepair, RelationshipSide,
    RelationshipValidation,
};
pub use relationship_collection::RelationshipCollection;
