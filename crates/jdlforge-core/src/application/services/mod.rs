//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "merge these documents" or "import the
//! generator's entity configuration".

pub mod document_service;
pub mod entity_service;
pub mod import_service;

pub use document_service::{DocumentService, ValidationReport};
pub use entity_service::EntityService;
pub use import_service::ImportService;
