//! Request and response shapes of the HTTP API

pub mod api_response;
pub mod inventory_dto;
pub mod lead_dto;

pub use api_response::{ApiEnvelope, ApiStatus};
