use crate::DomainError;
use crate::catalog::{CatalogEntry, CatalogTag, TagTemplate};
use async_trait::async_trait;

/// Remote metadata service consumed by the tag workflow
///
/// Implementations live in the infrastructure layer. Each call is a single
/// remote request; no retries are performed at this seam.
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// Resolve a linked-resource identifier to its catalog entry
    async fn lookup_entry(&self, linked_resource: &str) -> Result<CatalogEntry, DomainError>;

    /// Fetch a tag template by its full resource name
    async fn get_tag_template(&self, name: &str) -> Result<TagTemplate, DomainError>;

    /// Attach `tag` to the entry named `parent` and return the stored tag
    async fn create_tag(&self, parent: &str, tag: &CatalogTag) -> Result<CatalogTag, DomainError>;
}
