use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
    Form, Json, Router,
};

use crate::controllers::LeadController;
use crate::dto::lead_dto::LeadRequest;
use crate::dto::ApiStatus;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_lead_router() -> Router<AppState> {
    Router::new().route("/api/v1/interest", post(submit_interest))
}

/// Lead body, JSON or url-encoded form depending on `Content-Type`
pub struct LeadPayload(pub LeadRequest);

#[async_trait]
impl<S> FromRequest<S> for LeadPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v.starts_with("application/json"));

        let lead = if is_json {
            Json::<LeadRequest>::from_request(request, state)
                .await
                .map_err(|_| bad_request_error("Invalid request body"))?
                .0
        } else {
            Form::<LeadRequest>::from_request(request, state)
                .await
                .map_err(|_| bad_request_error("Invalid request body"))?
                .0
        };

        Ok(LeadPayload(lead))
    }
}

async fn submit_interest(
    State(state): State<AppState>,
    LeadPayload(request): LeadPayload,
) -> Result<Json<ApiStatus>, AppError> {
    let controller = LeadController::new(&state);
    Ok(Json(controller.submit(request).await?))
}
