//! Recompute the inventory facet counts and persist them
//!
//! Run after inventory changes so `/inventory/metadata` serves a fresh
//! snapshot without scanning the inventory on every request.

use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dealership_inventory::clients::FirebaseDatabaseClient;
use dealership_inventory::config::DatabaseConfig;
use dealership_inventory::repositories::InventoryRepository;
use dealership_inventory::services::InventoryQueryEngine;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DatabaseConfig::from_env()?;
    let store = FirebaseDatabaseClient::new(&config)?;
    let repository = InventoryRepository::new(Arc::new(store), config.clone(), None);

    info!("📥 Fetching inventory from: {}", config.inventory_path);
    let snapshot = repository.snapshot().await?;
    info!(
        "Found {} records ({} malformed skipped)",
        snapshot.len(),
        snapshot.dropped()
    );

    let metadata = InventoryQueryEngine::default().compute_metadata(snapshot.vehicles());
    info!("Makes: {:?}", metadata.makes);
    info!("ModelYears: {:?}", metadata.model_years);

    repository.save_metadata(&metadata).await?;
    info!("✅ Metadata written to {}", config.metadata_path);
    Ok(())
}
