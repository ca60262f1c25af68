//! Application layer for jdlforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (DocumentService, EntityService, ImportService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **DTOs**: Plain construction-parameter records
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod dto;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{DocumentService, EntityService, ImportService, ValidationReport};

// Re-export port traits (for adapter implementation)
pub use ports::{DocumentSource, EntityConfigStore};

pub use dto::{
    ApplicationParams, DeploymentParams, EntityDefinition, EntityParams, EnumParams,
    EnumValueParams, FieldDefinition, FieldParams, JdlDocument, OptionParams,
    RelationshipDefinition, RelationshipParams, ValidationParams,
};
pub use error::ApplicationError;
