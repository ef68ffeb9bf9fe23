use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use domain::error::Result;
use domain::{CatalogEntry, CatalogTag, FieldValueTranslator, MetadataCatalog, TagTemplate};

/// Creates and inspects tags on catalog entries.
///
/// Every operation is a fixed sequence of awaited calls against the catalog;
/// any failure is returned immediately.
pub struct TagManager {
    catalog: Arc<dyn MetadataCatalog>,
    translator: FieldValueTranslator,
}

impl TagManager {
    pub fn new(catalog: Arc<dyn MetadataCatalog>) -> Self {
        Self::with_translator(catalog, FieldValueTranslator::new())
    }

    pub fn with_translator(
        catalog: Arc<dyn MetadataCatalog>,
        translator: FieldValueTranslator,
    ) -> Self {
        Self {
            catalog,
            translator,
        }
    }

    /// Resolve the catalog entry behind a linked resource
    pub async fn lookup_entry(&self, linked_resource: &str) -> Result<CatalogEntry> {
        let entry = self.catalog.lookup_entry(linked_resource).await?;
        info!("📚 Data Catalog entry found: {}", entry.name);
        Ok(entry)
    }

    pub async fn get_tag_template(&self, name: &str) -> Result<TagTemplate> {
        let template = self.catalog.get_tag_template(name).await?;
        info!(
            "🏷️ Found tag template: {}, fields: {:?}",
            template.name,
            template.ordered_field_ids()
        );
        Ok(template)
    }

    /// Translate `fields` against `template` without contacting the catalog
    pub fn build_tag(
        &self,
        template: &TagTemplate,
        fields: &Map<String, Value>,
    ) -> Result<CatalogTag> {
        let tag = self.translator.build_tag(template, fields)?;
        debug!(
            template = %tag.template,
            translated = tag.fields.len(),
            supplied = fields.len(),
            "Tag payload built"
        );
        Ok(tag)
    }

    /// Resolve the entry, fetch the template, translate `fields` and attach the tag
    pub async fn create_tag(
        &self,
        linked_resource: &str,
        template_name: &str,
        fields: &Map<String, Value>,
    ) -> Result<CatalogTag> {
        let entry = self.lookup_entry(linked_resource).await?;
        let template = self.get_tag_template(template_name).await?;
        let tag = self.build_tag(&template, fields)?;

        let created = self.catalog.create_tag(&entry.name, &tag).await?;
        info!(
            "✅ Tag created with name: {}",
            created.name.as_deref().unwrap_or("<unnamed>")
        );
        Ok(created)
    }
}
