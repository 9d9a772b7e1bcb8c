//! Estado compartido de la aplicación
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo lo que contiene es barato de clonar.

use std::sync::Arc;

use crate::cache::RedisClient;
use crate::clients::{BlobStore, RecordStore};
use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::InventoryRepository;
use crate::services::{FeedService, ImageService, InventoryQueryEngine, LeadMailer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub engine: InventoryQueryEngine,
    pub inventory: InventoryRepository,
    pub images: ImageService,
    pub mailer: Arc<dyn LeadMailer>,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        mailer: Arc<dyn LeadMailer>,
        cache: Option<RedisClient>,
    ) -> Self {
        let engine = InventoryQueryEngine::new(config.engine_config());
        let inventory = InventoryRepository::new(records, config.database.clone(), cache);
        let images = ImageService::new(blobs, config.storage.clone());
        let rate_limit = RateLimitState::new(
            config.rate_limit_requests,
            std::time::Duration::from_secs(config.rate_limit_window),
        );

        Self {
            config: Arc::new(config),
            engine,
            inventory,
            images,
            mailer,
            rate_limit,
        }
    }

    pub fn feed(&self) -> FeedService {
        FeedService::new(self.config.dealership.clone())
    }
}
