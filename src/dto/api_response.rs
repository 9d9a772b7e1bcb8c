//! API response envelope
//!
//! `{ status_code, data, count, error }`, the shape every JSON endpoint
//! answers with. `count` and `pages` only appear on list responses.

use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub status_code: u16,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            data: Some(data),
            count: None,
            pages: None,
            error: None,
        }
    }

    pub fn list(data: T, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }

    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data: None,
            count: None,
            pages: None,
            error: Some(message.into()),
        }
    }
}

/// Status-only response (lead submissions)
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub status_code: u16,
    pub error: Option<String>,
}

impl ApiStatus {
    pub fn ok() -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            error: None,
        }
    }
}
