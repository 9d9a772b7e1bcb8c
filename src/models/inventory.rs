//! Inventory snapshot
//!
//! A one-shot read of the inventory node, decoded record by record. Only
//! records that are not objects are dropped; a field that does not decode
//! is read as unknown and the rest of the vehicle is kept.

use serde_json::Value;
use tracing::debug;

use super::vehicle::Vehicle;

#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    vehicles: Vec<Vehicle>,
    dropped: usize,
}

impl InventorySnapshot {
    /// Decode the raw inventory node
    ///
    /// The node is either an object keyed by stock number or a plain array
    /// (older seeds). Anything else yields an empty snapshot.
    pub fn from_value(node: Value) -> Self {
        let records: Vec<(Option<String>, Value)> = match node {
            Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
            _ => Vec::new(),
        };

        let mut vehicles = Vec::with_capacity(records.len());
        let mut dropped = 0;

        for (key, record) in records {
            match decode_record(key.as_deref(), record) {
                Some(vehicle) => vehicles.push(vehicle),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("🗑️ Dropped {} malformed inventory records", dropped);
        }

        Self { vehicles, dropped }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Records skipped while decoding
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn find(&self, stock_num: &str) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.stock_num() == Some(stock_num))
    }
}

/// Decode a single stored record, `None` when malformed
pub fn decode_record(key: Option<&str>, record: Value) -> Option<Vehicle> {
    if !record.is_object() {
        debug!("Skipping non-object record {:?}", key);
        return None;
    }

    match serde_json::from_value::<Vehicle>(record) {
        Ok(mut vehicle) => {
            // The node key is the stock number when the record omits it
            if vehicle.stock_num.is_none() {
                vehicle.stock_num = key.map(str::to_string);
            }
            Some(vehicle)
        }
        Err(e) => {
            debug!("Skipping malformed record {:?}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_node_drops_malformed_records() {
        let snapshot = InventorySnapshot::from_value(json!({
            "A1": { "StockNum": "A1", "Make": "Toyota", "ModelYear": 2020 },
            "A2": "not a vehicle",
            "A3": [1, 2, 3],
            "A4": null,
            "A5": { "Make": "Honda" }
        }));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.dropped(), 3);
        assert_eq!(snapshot.find("A5").and_then(|v| v.make.as_deref()), Some("Honda"));
    }

    #[test]
    fn test_bad_field_keeps_the_record() {
        let snapshot = InventorySnapshot::from_value(json!({
            "A1": { "StockNum": "A1", "Make": "Toyota", "Price": "" },
            "A2": { "StockNum": "A2", "Make": "Honda", "IntColor": ["Black"] },
            "A3": { "StockNum": "A3", "Make": "Ford", "Odometer": 45210.0 },
            "A4": { "Make": "Subaru", "ModelYear": "twenty" }
        }));

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.dropped(), 0);
        assert!(snapshot.find("A1").unwrap().price.is_none());
        assert!(snapshot.find("A2").unwrap().int_color.is_none());
        assert_eq!(snapshot.find("A3").unwrap().odometer, Some(45210));

        let a4 = snapshot.find("A4").unwrap();
        assert_eq!(a4.make.as_deref(), Some("Subaru"));
        assert!(a4.model_year.is_none());
    }

    #[test]
    fn test_array_node() {
        let snapshot = InventorySnapshot::from_value(json!([
            { "StockNum": 7, "Make": "Toyota" },
            null,
            { "StockNum": "8", "Make": "Ford" }
        ]));
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.find("7").is_some());
    }

    #[test]
    fn test_null_node_is_empty() {
        let snapshot = InventorySnapshot::from_value(Value::Null);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dropped(), 0);
    }
}
