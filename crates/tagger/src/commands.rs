use anyhow::Result;
use serde_json::{Map, Value};
use tracing::info;

use application::TagManager;
use domain::{CatalogEntry, CatalogTag, LinkedResource, TagTemplate, TemplateName};

use crate::cli::Command;

/// Run one subcommand against the catalog
pub async fn execute(
    command: Command,
    manager: &TagManager,
    resource: &LinkedResource,
    template_name: &TemplateName,
    fields: &Map<String, Value>,
) -> Result<()> {
    match command {
        Command::Lookup => {
            let entry = manager.lookup_entry(resource.as_str()).await?;
            describe_entry(&entry);
        }
        Command::Template => {
            let template = manager.get_tag_template(&template_name.to_string()).await?;
            describe_template(&template);
        }
        Command::Preview => {
            let entry = manager.lookup_entry(resource.as_str()).await?;
            let template = manager.get_tag_template(&template_name.to_string()).await?;
            let tag = manager.build_tag(&template, fields)?;
            info!("👀 Preview of tag for entry {} (not submitted)", entry.name);
            describe_tag(&tag);
        }
        Command::Apply => {
            let created = manager
                .create_tag(resource.as_str(), &template_name.to_string(), fields)
                .await?;
            info!(
                "Created new tag: {}",
                created.name.as_deref().unwrap_or("<unnamed>")
            );
            describe_tag(&created);
        }
    }
    Ok(())
}

fn describe_entry(entry: &CatalogEntry) {
    info!("Data Catalog Entry Name: {}", entry.name);
    if let Some(fqn) = &entry.fully_qualified_name {
        info!("Fully qualified name: {}", fqn);
    }
    info!(
        "Description: {}",
        entry.description.as_deref().unwrap_or("<none>")
    );
    info!("Schema: {} column(s)", entry.columns.len());
    for column in &entry.columns {
        info!(
            " - {} {} {}",
            column.column,
            column.column_type,
            column.mode.as_deref().unwrap_or("NULLABLE")
        );
    }
}

fn describe_template(template: &TagTemplate) {
    info!("Tag Template: {}", template.name);
    info!("Template fields:");
    for id in template.ordered_field_ids() {
        if let Some(field) = template.field(id) {
            let required = if field.is_required { " (required)" } else { "" };
            info!(" - Field ID: {}, Type: {}{}", id, field.field_type, required);
        }
    }
}

fn describe_tag(tag: &CatalogTag) {
    info!("Template: {}", tag.template);
    for (id, value) in &tag.fields {
        info!(" - {} = {}", id, value);
    }
}
