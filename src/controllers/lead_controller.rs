//! Lead capture controller
//!
//! Checks run in a fixed order and the first failure is reported.

use std::sync::Arc;

use validator::Validate;

use crate::dto::lead_dto::{LeadRequest, ValidLead};
use crate::dto::ApiStatus;
use crate::repositories::InventoryRepository;
use crate::services::{LeadMailer, LeadNotification};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::validation::{validate_email, validate_full_name, validate_stock_number};

pub struct LeadController {
    repository: InventoryRepository,
    mailer: Arc<dyn LeadMailer>,
}

impl LeadController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.inventory.clone(),
            mailer: state.mailer.clone(),
        }
    }

    pub async fn submit(&self, request: LeadRequest) -> AppResult<ApiStatus> {
        let lead = Self::check(&request)?;
        request.validate()?;

        let vehicle = self
            .repository
            .find_by_stock_num(&lead.stock_num)
            .await?
            .ok_or_else(|| bad_request_error("Vehicle does not exist"))?;

        self.mailer
            .send_lead(&LeadNotification::new(lead, vehicle))
            .await?;

        Ok(ApiStatus::ok())
    }

    fn check(request: &LeadRequest) -> AppResult<ValidLead> {
        let stock_num = request.stocknum.as_deref().unwrap_or_default().trim();
        if validate_stock_number(stock_num).is_err() {
            return Err(bad_request_error("Invalid stock number"));
        }

        let email = request.email.as_deref().unwrap_or_default().trim();
        if validate_email(email).is_err() {
            return Err(bad_request_error("Invalid email provided"));
        }

        // The space check runs on the name as sent; "Jane " passes
        let full_name = request.fullname.as_deref().unwrap_or_default();
        if validate_full_name(full_name).is_err() {
            return Err(bad_request_error("Invalid name provided"));
        }

        Ok(ValidLead {
            stock_num: stock_num.to_string(),
            email: email.to_string(),
            full_name: full_name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn request(stocknum: &str, email: &str, fullname: &str) -> LeadRequest {
        LeadRequest {
            stocknum: Some(stocknum.to_string()),
            email: Some(email.to_string()),
            fullname: Some(fullname.to_string()),
        }
    }

    fn message(result: AppResult<ValidLead>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other.map(|l| l.stock_num)),
        }
    }

    #[test]
    fn test_checks_run_in_order() {
        assert_eq!(
            message(LeadController::check(&request("", "nope", "Jane"))),
            "Invalid stock number"
        );
        assert_eq!(
            message(LeadController::check(&request("A1", "nope", "Jane"))),
            "Invalid email provided"
        );
        assert_eq!(
            message(LeadController::check(&request("A1", "jane@example.com", "Jane"))),
            "Invalid name provided"
        );
    }

    #[test]
    fn test_valid_lead_is_trimmed() {
        let lead = LeadController::check(&request(" A1 ", " jane@example.com", "Jane Doe ")).unwrap();
        assert_eq!(
            lead,
            ValidLead {
                stock_num: "A1".to_string(),
                email: "jane@example.com".to_string(),
                full_name: "Jane Doe".to_string(),
            }
        );
    }

    #[test]
    fn test_trailing_space_counts_as_name_separator() {
        let lead = LeadController::check(&request("A1", "jane@example.com", "Jane ")).unwrap();
        assert_eq!(lead.full_name, "Jane");

        assert_eq!(
            message(LeadController::check(&request("A1", "jane@example.com", "   "))),
            "Invalid name provided"
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            message(LeadController::check(&LeadRequest::default())),
            "Invalid stock number"
        );
    }
}
