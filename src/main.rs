use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dealership_inventory::cache::RedisClient;
use dealership_inventory::clients::{FirebaseDatabaseClient, FirebaseStorageClient};
use dealership_inventory::config::EnvironmentConfig;
use dealership_inventory::services::SmtpMailer;
use dealership_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Dealership Inventory API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("✅ Configuración cargada ({})", config.environment);

    let records = FirebaseDatabaseClient::new(&config.database)?;
    let blobs = FirebaseStorageClient::new(&config.storage)?;
    let mailer = SmtpMailer::new(&config.mail, config.dealership.clone())?;

    let cache = match RedisClient::connect(&config.cache).await {
        Ok(cache) => cache,
        Err(e) => {
            warn!("⚠️ Redis no disponible, continuando sin cache: {}", e);
            None
        }
    };

    let state = AppState::new(
        config,
        Arc::new(records),
        Arc::new(blobs),
        Arc::new(mailer),
        cache,
    );

    dealership_inventory::start_server(state).await
}
