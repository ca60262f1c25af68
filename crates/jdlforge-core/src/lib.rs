//! jdlforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for jdlforge: an
//! in-memory model of JDL documents (applications, deployments, entities,
//! enums, relationships and options) with validation, merging and rendering
//! back to JDL text.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          jdlforge-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (DocumentService, EntityService, Import)│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (DocumentSource, EntityConfigStore)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    jdlforge-adapters (Infrastructure)   │
//! │ (FileDocumentSource, LocalEntityConfig) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (JdlObject, Entity, Relationship, ...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use jdlforge_core::domain::{Entity, Field, JdlObject, Relationship, RelationshipType};
//!
//! let mut author = Entity::new("Author").unwrap();
//! author.add_field(Field::new("name", "String").unwrap()).unwrap();
//!
//! let mut jdl = JdlObject::new();
//! jdl.add_entity(author).unwrap();
//! jdl.add_entity(Entity::new("Book").unwrap()).unwrap();
//! jdl.add_relationship(
//!     Relationship::builder(RelationshipType::OneToMany, "Author", "Book")
//!         .injected_field_in_from("book")
//!         .injected_field_in_to("writer")
//!         .build()
//!         .unwrap(),
//! )
//! .unwrap();
//!
//! assert!(jdl.to_string().contains("Author{book} to Book{writer}"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DocumentService, EntityService, ImportService, ValidationReport,
        ports::{DocumentSource, EntityConfigStore},
    };
    pub use crate::domain::{
        ApplicationConfig, ApplicationType, DeploymentConfig, DomainError, EnumRegistry,
        Enumeration, Entity, Field, JdlObject, JdlOption, Relationship, RelationshipType,
        ValidationRule, merge_jdl_objects,
    };
    pub use crate::error::{JdlError, JdlResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
