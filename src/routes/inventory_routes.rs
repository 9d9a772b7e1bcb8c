use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::InventoryController;
use crate::dto::inventory_dto::{InventoryItems, InventoryQueryParams, LimitParams, SearchParams};
use crate::dto::ApiEnvelope;
use crate::models::{InventoryMetadata, Vehicle, VehicleWithImages};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inventory_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/inventory", get(list_inventory))
        .route("/api/v1/inventory/metadata", get(inventory_metadata))
        .route("/api/v1/inventory/search", get(search_inventory))
        .route("/api/v1/inventory/:stocknum", get(get_vehicle))
        .route(
            "/api/v1/inventory/:stocknum/recommendations",
            get(recommendations),
        )
}

async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryQueryParams>,
) -> Result<Json<ApiEnvelope<InventoryItems>>, AppError> {
    let controller = InventoryController::new(&state);
    Ok(Json(controller.list(&params).await?))
}

async fn inventory_metadata(
    State(state): State<AppState>,
) -> Result<Json<ApiEnvelope<InventoryMetadata>>, AppError> {
    let controller = InventoryController::new(&state);
    Ok(Json(controller.metadata().await?))
}

async fn search_inventory(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiEnvelope<Vec<Vehicle>>>, AppError> {
    let controller = InventoryController::new(&state);
    Ok(Json(controller.search(&params).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(stocknum): Path<String>,
) -> Result<Json<ApiEnvelope<VehicleWithImages>>, AppError> {
    let controller = InventoryController::new(&state);
    Ok(Json(controller.item(&stocknum).await?))
}

async fn recommendations(
    State(state): State<AppState>,
    Path(stocknum): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<ApiEnvelope<Vec<Vehicle>>>, AppError> {
    let controller = InventoryController::new(&state);
    Ok(Json(controller.recommendations(&stocknum, &params).await?))
}
