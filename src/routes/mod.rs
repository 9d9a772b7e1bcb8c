//! HTTP routes
//!
//! Every endpoint lives under `/api/v1`. Rate limiting and CORS wrap the
//! whole router.

pub mod feed_routes;
pub mod inventory_routes;
pub mod lead_routes;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};

use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::dto::ApiEnvelope;
use crate::middleware::{cors_middleware, rate_limit_middleware};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(not_found))
        .route("/api/v1/", get(not_found))
        .merge(inventory_routes::create_inventory_router())
        .merge(lead_routes::create_lead_router())
        .merge(feed_routes::create_feed_router())
        .fallback(not_found)
        .layer(from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit_middleware,
        ))
        .layer(cors_middleware(&state.config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ApiEnvelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiEnvelope::error(StatusCode::NOT_FOUND, "Not Found")),
    )
}
