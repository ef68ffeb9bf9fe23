use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::TagManager;
use domain::FieldValueTranslator;
use infrastructure::{DataCatalogClient, TaggerConfig};
use tagger::{Args, commands, fields};

async fn run() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tagger=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // 1. Load Configuration
    info!("📂 Config directory: {}", args.config_dir);
    let mut config = TaggerConfig::load(&args.config_dir)?;

    // Override with CLI args if present
    if let Some(project) = args.project {
        config.target.project = project;
    }
    if let Some(dataset) = args.dataset {
        config.target.dataset = dataset;
    }
    if let Some(table) = args.table {
        config.target.table = table;
    }
    if let Some(template_id) = args.template_id {
        config.target.template_id = template_id;
    }
    if args.validate_enums {
        config.validate_enum_values = true;
    }

    // 2. Resource names
    let resource = config.target.linked_resource()?;
    let template_name = config.target.template_name()?;
    info!("Linked resource name: {}", resource);
    info!("Tag template name: {}", template_name);

    // 3. Field values: config, then file, then --set
    let mut layers = vec![std::mem::take(&mut config.fields)];
    if let Some(path) = &args.fields {
        layers.push(fields::load_fields_file(path)?);
    }
    let mut assignments = serde_json::Map::new();
    for assignment in &args.set {
        let (key, value) = fields::parse_assignment(assignment)?;
        assignments.insert(key, value);
    }
    layers.push(assignments);
    let raw_fields = fields::merge_fields(layers);

    // 4. Catalog client
    if config.catalog.access_token.is_none() {
        warn!("⚠️ No access token configured, requests will be unauthenticated");
    }
    let client = DataCatalogClient::new(&config.catalog)?;
    info!("🔌 Metadata catalog endpoint: {}", client.base_url());

    let translator = FieldValueTranslator::with_enum_validation(config.validate_enum_values);
    let manager = TagManager::with_translator(Arc::new(client), translator);

    commands::execute(
        args.command,
        &manager,
        &resource,
        &template_name,
        &raw_fields,
    )
    .await
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run()) {
        eprintln!("\n❌ ERROR: {:?}", e);
        std::process::exit(1);
    }
}
