//! Vehicle images
//!
//! Images live in the blob store under `{prefix}/{StockNum}/`. They are
//! referenced from a vehicle's presentation, never stored on the record.

use serde::{Deserialize, Serialize};

use super::vehicle::Vehicle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleImage {
    pub name: String,
    pub url: String,
}

/// Vehicle plus its resolved image links
#[derive(Debug, Clone, Serialize)]
pub struct VehicleWithImages {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(rename = "Images")]
    pub images: Vec<VehicleImage>,
}
