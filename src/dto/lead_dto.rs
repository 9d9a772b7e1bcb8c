//! Lead capture payload

use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::string_or_number;

/// `POST /interest` body (JSON or form encoded)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LeadRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(length(max = 64))]
    pub stocknum: Option<String>,

    #[serde(default)]
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 120))]
    pub fullname: Option<String>,
}

/// Lead that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
    pub stock_num: String,
    pub email: String,
    pub full_name: String,
}
