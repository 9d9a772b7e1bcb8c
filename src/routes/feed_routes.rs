use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::controllers::FeedController;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_feed_router() -> Router<AppState> {
    Router::new().route("/api/v1/feed.csv", get(inventory_feed))
}

async fn inventory_feed(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let controller = FeedController::new(&state);
    let csv = controller.render().await?;
    Ok(([(CONTENT_TYPE, "text/csv; charset=utf-8")], csv))
}
