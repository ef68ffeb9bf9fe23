use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use domain::{CatalogEntry, CatalogTag, DomainError, MetadataCatalog, TagTemplate};

use super::wire::{EntryDto, TagDto, TagTemplateDto, error_from_response};
use crate::config::CatalogConfig;

/// Data Catalog v1 REST client
pub struct DataCatalogClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
    quota_project: Option<String>,
}

impl DataCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            quota_project: config.quota_project.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/v1/{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header("Accept", "application/json");

        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(project) = &self.quota_project {
            builder = builder.header("x-goog-user-project", project);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(error_from_response(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to decode response: {}", e)))
    }
}

/// Body of an error response, or the reason it could not be read
fn error_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

#[async_trait]
impl MetadataCatalog for DataCatalogClient {
    async fn lookup_entry(&self, linked_resource: &str) -> Result<CatalogEntry, DomainError> {
        debug!(linked_resource, "Looking up catalog entry");
        let request = self
            .request(Method::GET, "entries:lookup")
            .query(&[("linkedResource", linked_resource)]);

        let entry: EntryDto = self.send(request).await?;
        Ok(entry.into())
    }

    async fn get_tag_template(&self, name: &str) -> Result<TagTemplate, DomainError> {
        debug!(name, "Fetching tag template");
        let template: TagTemplateDto = self.send(self.request(Method::GET, name)).await?;
        Ok(template.into())
    }

    async fn create_tag(&self, parent: &str, tag: &CatalogTag) -> Result<CatalogTag, DomainError> {
        debug!(parent, template = %tag.template, "Creating tag");
        let request = self
            .request(Method::POST, &format!("{}/tags", parent))
            .json(&TagDto::from(tag));

        let created: TagDto = self.send(request).await?;
        Ok(created.into())
    }
}
