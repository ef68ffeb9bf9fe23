//! Domain layer - Pure catalog model with no I/O
//!
//! This crate contains:
//! - Catalog model (entries, tag templates, tags, resource names)
//! - The field value translator (raw values -> typed tag fields)
//! - The `MetadataCatalog` interface implemented by the infrastructure layer
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Testable in isolation

pub mod catalog;
pub mod error;
pub mod translator;

// Re-export commonly used types
pub use catalog::{
    CatalogEntry, CatalogTag, FieldType, LinkedResource, MetadataCatalog, PrimitiveType,
    TagTemplate, TemplateField, TemplateName, TypedFieldValue,
};
pub use error::DomainError;
pub use translator::FieldValueTranslator;
