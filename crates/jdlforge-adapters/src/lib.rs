//! Infrastructure adapters for jdlforge.
//!
//! This crate implements the ports defined in `jdlforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod config_store;
pub mod document_source;

// Re-export commonly used adapters
pub use config_store::{InMemoryEntityConfigStore, LocalEntityConfigStore};
pub use document_source::{DocumentFormat, FileDocumentSource};
