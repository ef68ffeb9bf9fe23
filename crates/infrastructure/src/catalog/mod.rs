pub mod http_client;
pub mod wire;

pub use http_client::DataCatalogClient;
