//! Infrastructure layer - External integrations

pub mod catalog;
pub mod config;

pub use catalog::DataCatalogClient;
pub use config::{CatalogConfig, TaggerConfig, TargetConfig};
