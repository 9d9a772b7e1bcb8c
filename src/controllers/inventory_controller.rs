//! Inventory controller
//!
//! Loads the snapshot, runs the query engine and shapes the envelope.

use crate::dto::inventory_dto::{InventoryItems, InventoryQueryParams, LimitParams, SearchParams};
use crate::dto::ApiEnvelope;
use crate::models::{InventoryMetadata, Vehicle, VehicleWithImages};
use crate::repositories::InventoryRepository;
use crate::services::vehicle_filter::VehiclePredicate;
use crate::services::{ImageService, InventoryQueryEngine};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::validate_stock_number;

pub struct InventoryController {
    repository: InventoryRepository,
    images: ImageService,
    engine: InventoryQueryEngine,
}

impl InventoryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.inventory.clone(),
            images: state.images.clone(),
            engine: state.engine,
        }
    }

    pub async fn list(&self, params: &InventoryQueryParams) -> AppResult<ApiEnvelope<InventoryItems>> {
        let snapshot = self.repository.snapshot().await?;
        let filter = params.filter();
        let predicate: Option<&dyn VehiclePredicate> = if filter.is_empty() {
            None
        } else {
            Some(&filter as &dyn VehiclePredicate)
        };

        let Some(result) = self.engine.query(
            snapshot.vehicles(),
            params.sort_args(),
            predicate,
            Some(params.paginate()),
        ) else {
            return Ok(ApiEnvelope::list(InventoryItems::Plain(Vec::new()), 0).with_pages(0));
        };

        let items = if params.with_images() {
            InventoryItems::WithImages(self.images.enrich(result.data).await)
        } else {
            InventoryItems::Plain(result.data.into_iter().cloned().collect())
        };

        Ok(ApiEnvelope::list(items, result.count).with_pages(result.pages))
    }

    /// Persisted snapshot when present, otherwise computed live
    pub async fn metadata(&self) -> AppResult<ApiEnvelope<InventoryMetadata>> {
        if let Some(metadata) = self.repository.fetch_metadata().await? {
            return Ok(ApiEnvelope::ok(metadata));
        }

        let snapshot = self.repository.snapshot().await?;
        Ok(ApiEnvelope::ok(self.engine.compute_metadata(snapshot.vehicles())))
    }

    pub async fn search(&self, params: &SearchParams) -> AppResult<ApiEnvelope<Vec<Vehicle>>> {
        if params.is_blank() {
            return Ok(ApiEnvelope::list(Vec::new(), 0));
        }

        let snapshot = self.repository.snapshot().await?;
        let matches: Vec<Vehicle> = self
            .engine
            .search(snapshot.vehicles(), params.query(), params.limit())
            .into_iter()
            .cloned()
            .collect();

        let count = matches.len();
        Ok(ApiEnvelope::list(matches, count))
    }

    pub async fn item(&self, stock_num: &str) -> AppResult<ApiEnvelope<VehicleWithImages>> {
        if validate_stock_number(stock_num).is_err() {
            return Err(not_found_error("Vehicle", stock_num));
        }

        let vehicle = self
            .repository
            .find_by_stock_num(stock_num)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", stock_num))?;

        Ok(ApiEnvelope::ok(self.images.with_images(vehicle).await))
    }

    pub async fn recommendations(
        &self,
        stock_num: &str,
        params: &LimitParams,
    ) -> AppResult<ApiEnvelope<Vec<Vehicle>>> {
        let snapshot = self.repository.snapshot().await?;
        let recommended: Vec<Vehicle> = self
            .engine
            .recommend(snapshot.vehicles(), stock_num, params.limit())
            .into_iter()
            .cloned()
            .collect();

        let count = recommended.len();
        Ok(ApiEnvelope::list(recommended, count))
    }
}
