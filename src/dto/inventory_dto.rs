//! Inventory query parameters
//!
//! Everything arrives as text and is parsed leniently: a value that does not
//! parse is ignored and the engine default applies.

use serde::{Deserialize, Serialize};

use crate::models::{
    BodyStyle, Condition, Drivetrain, FuelType, Transmission, Vehicle, VehicleWithImages,
};
use crate::services::inventory_query_engine::{Paginate, SortArgs, SortKey, SortOrder};
use crate::services::vehicle_filter::VehicleFilter;

/// `GET /inventory` query string
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQueryParams {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    /// Comma separated makes
    pub make: Option<String>,
    /// Comma separated model years
    pub year: Option<String>,
    pub sold: Option<String>,
    pub condition: Option<String>,
    pub drivetrain: Option<String>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
    pub body: Option<String>,
    pub images: Option<String>,
}

impl InventoryQueryParams {
    pub fn sort_args(&self) -> Option<SortArgs> {
        if self.sort.is_none() && self.order.is_none() {
            return None;
        }

        Some(SortArgs {
            key: self
                .sort
                .as_deref()
                .map(SortKey::parse_lenient)
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .map(SortOrder::parse_lenient)
                .unwrap_or_default(),
        })
    }

    pub fn paginate(&self) -> Paginate {
        Paginate {
            limit: self.limit.as_deref().and_then(|v| v.trim().parse().ok()),
            offset: self.offset.as_deref().and_then(|v| v.trim().parse().ok()),
        }
    }

    pub fn filter(&self) -> VehicleFilter {
        let mut filter = VehicleFilter::new();

        if let Some(makes) = self.make.as_deref() {
            filter = filter.with_makes(split_list(makes));
        }
        if let Some(years) = self.year.as_deref() {
            filter = filter.with_model_years(split_list(years).filter_map(|y| y.parse().ok()));
        }
        if let Some(sold) = self.sold.as_deref().and_then(parse_bool) {
            filter = filter.with_sold(sold);
        }
        if let Some(condition) = self.condition.as_deref().and_then(parse_enum::<Condition>) {
            filter = filter.with_condition(condition);
        }
        if let Some(drivetrain) = self.drivetrain.as_deref().and_then(parse_enum::<Drivetrain>) {
            filter = filter.with_drivetrain(drivetrain);
        }
        if let Some(transmission) = self.transmission.as_deref().and_then(parse_enum::<Transmission>) {
            filter = filter.with_transmission(transmission);
        }
        if let Some(fuel) = self.fuel.as_deref().and_then(parse_enum::<FuelType>) {
            filter = filter.with_fuel_type(fuel);
        }
        if let Some(body) = self.body.as_deref().and_then(parse_enum::<BodyStyle>) {
            filter = filter.with_body_style(body);
        }

        filter
    }

    pub fn with_images(&self) -> bool {
        self.images.as_deref().and_then(parse_bool).unwrap_or(false)
    }
}

/// `GET /inventory/search` query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// Search text as sent; surrounding spaces take part in matching
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// Missing or whitespace-only text
    pub fn is_blank(&self) -> bool {
        self.query().trim().is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// `?limit=` only
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

impl LimitParams {
    pub fn limit(&self) -> Option<usize> {
        self.limit.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// Listing payload, with or without resolved images
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InventoryItems {
    Plain(Vec<Vehicle>),
    WithImages(Vec<VehicleWithImages>),
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Enum from its stored label, e.g. "4WD" or "Automatic"
fn parse_enum<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).ok()
}
