//! Inventory metadata
//!
//! Facet counts used by the listing sidebar. Always derived from the
//! inventory, either on demand or from the snapshot written by `reindex`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Facet key for records that do not carry the counted attribute
pub const UNKNOWN_FACET: &str = "Unknown";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryMetadata {
    #[serde(rename = "Makes", default)]
    pub makes: BTreeMap<String, u64>,
    #[serde(rename = "ModelYears", default)]
    pub model_years: BTreeMap<String, u64>,
}

impl InventoryMetadata {
    pub fn make_total(&self) -> u64 {
        self.makes.values().sum()
    }

    pub fn model_year_total(&self) -> u64 {
        self.model_years.values().sum()
    }
}
