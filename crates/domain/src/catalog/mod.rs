mod entry;
mod repository;
mod resource;
mod tag;
mod template;

pub use entry::{CatalogEntry, ColumnSchema};
pub use repository::MetadataCatalog;
pub use resource::{BIGQUERY_SERVICE_DOMAIN, LinkedResource, TemplateName};
pub use tag::{CatalogTag, TypedFieldValue};
pub use template::{EnumType, FieldType, PrimitiveType, TagTemplate, TemplateField};
