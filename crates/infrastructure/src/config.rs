use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use domain::catalog::BIGQUERY_SERVICE_DOMAIN;
use domain::{LinkedResource, TemplateName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ENDPOINT: &str = "https://datacatalog.googleapis.com";

/// Connection settings for the metadata catalog, passed to the client constructor
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// OAuth2 bearer token (e.g. `gcloud auth print-access-token`)
    #[serde(default)]
    pub access_token: Option<String>,
    /// Project billed for quota, sent as `x-goog-user-project`
    #[serde(default)]
    pub quota_project: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: None,
            quota_project: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The table to tag and the template to tag it with
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TargetConfig {
    pub project: String,
    #[serde(default = "default_location")]
    pub location: String,
    pub dataset: String,
    pub table: String,
    pub template_id: String,
    #[serde(default = "default_service_domain")]
    pub service_domain: String,
}

fn default_location() -> String {
    "us".to_string()
}
fn default_service_domain() -> String {
    BIGQUERY_SERVICE_DOMAIN.to_string()
}

impl TargetConfig {
    pub fn linked_resource(&self) -> domain::error::Result<LinkedResource> {
        LinkedResource::table(&self.service_domain, &self.project, &self.dataset, &self.table)
    }

    pub fn template_name(&self) -> domain::error::Result<TemplateName> {
        TemplateName::new(&self.project, &self.location, &self.template_id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TaggerConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub target: TargetConfig,
    #[serde(default)]
    pub validate_enum_values: bool,
    /// Raw values for the tag, keyed by template field id
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl TaggerConfig {
    pub fn load(config_dir: &str) -> Result<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = defaults()?
            // Local config file - e.g. config/default.toml
            // REQUIRED: there is no sensible target table without it
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(true))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. TAGGER__CATALOG__ACCESS_TOKEN=ya29...)
            .add_source(Environment::with_prefix("TAGGER").separator("__"));

        Self::build(builder)
            .with_context(|| format!("Failed to load configuration from '{}'", config_dir))
    }

    /// Load from an in-memory TOML document, without files or environment
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::build(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("catalog.endpoint", DEFAULT_ENDPOINT)?
        .set_default("catalog.timeout_secs", 30)?
        .set_default("target.location", "us")?
        .set_default("target.service_domain", BIGQUERY_SERVICE_DOMAIN)?
        .set_default("validate_enum_values", false)?)
}
