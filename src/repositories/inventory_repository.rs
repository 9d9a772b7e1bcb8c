//! Inventory repository
//!
//! Reads and writes the inventory and metadata nodes of the record store,
//! with the optional Redis cache in front of the reads.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::cache::{CacheOperations, RedisClient};
use crate::clients::{ClientError, RecordStore};
use crate::config::DatabaseConfig;
use crate::models::inventory::decode_record;
use crate::models::{InventoryMetadata, InventorySnapshot, Vehicle};

#[derive(Clone)]
pub struct InventoryRepository {
    store: Arc<dyn RecordStore>,
    config: DatabaseConfig,
    cache: Option<RedisClient>,
}

impl InventoryRepository {
    pub fn new(store: Arc<dyn RecordStore>, config: DatabaseConfig, cache: Option<RedisClient>) -> Self {
        Self { store, config, cache }
    }

    /// Whole inventory, malformed records dropped
    pub async fn snapshot(&self) -> Result<InventorySnapshot, ClientError> {
        let path = &self.config.inventory_path;
        let key = self.cache.as_ref().map(|c| c.inventory_key(path));

        let node = match self.cached::<Value>(key.as_deref()).await {
            Some(node) => node,
            None => {
                let node = self.store.get(path).await?.unwrap_or(Value::Null);
                self.remember(key.as_deref(), &node).await;
                node
            }
        };

        let snapshot = InventorySnapshot::from_value(node);
        debug!(
            "📦 Inventory loaded: {} vehicles ({} dropped)",
            snapshot.len(),
            snapshot.dropped()
        );
        Ok(snapshot)
    }

    /// Single vehicle by stock number
    ///
    /// Reads the record node directly; inventories stored as an array are
    /// not keyed by stock number, so those fall back to a snapshot scan.
    pub async fn find_by_stock_num(&self, stock_num: &str) -> Result<Option<Vehicle>, ClientError> {
        if let Some(record) = self.store.get(&self.config.record_path(stock_num)).await? {
            return Ok(decode_record(Some(stock_num), record)
                .filter(|v| v.stock_num() == Some(stock_num)));
        }

        Ok(self.snapshot().await?.find(stock_num).cloned())
    }

    /// Persisted facet snapshot, `None` when missing or unreadable
    pub async fn fetch_metadata(&self) -> Result<Option<InventoryMetadata>, ClientError> {
        let path = &self.config.metadata_path;
        let key = self.cache.as_ref().map(|c| c.metadata_key(path));

        if let Some(metadata) = self.cached::<InventoryMetadata>(key.as_deref()).await {
            return Ok(Some(metadata));
        }

        let Some(node) = self.store.get(path).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<InventoryMetadata>(node) {
            Ok(metadata) => {
                self.remember(key.as_deref(), &metadata).await;
                Ok(Some(metadata))
            }
            Err(e) => {
                warn!("⚠️ Ignoring unreadable metadata at {}: {}", path, e);
                Ok(None)
            }
        }
    }

    pub async fn save_metadata(&self, metadata: &InventoryMetadata) -> Result<(), ClientError> {
        let path = &self.config.metadata_path;
        self.store.set(path, &serde_json::to_value(metadata)?).await?;

        if let Some(cache) = &self.cache {
            let _ = cache.delete(&cache.metadata_key(path)).await;
        }

        info!(
            "💾 Metadata saved: {} makes, {} model years",
            metadata.makes.len(),
            metadata.model_years.len()
        );
        Ok(())
    }

    /// Overwrite the inventory node with records keyed by stock number
    ///
    /// Vehicles without a stock number cannot be addressed and are skipped.
    pub async fn replace_inventory(&self, vehicles: &[Vehicle]) -> Result<usize, ClientError> {
        let mut node = Map::new();
        for vehicle in vehicles {
            if let Some(stock_num) = vehicle.stock_num() {
                node.insert(stock_num.to_string(), serde_json::to_value(vehicle)?);
            }
        }

        let written = node.len();
        let path = &self.config.inventory_path;
        self.store.set(path, &Value::Object(node)).await?;

        if let Some(cache) = &self.cache {
            let _ = cache.delete(&cache.inventory_key(path)).await;
        }

        info!("💾 Inventory replaced: {} vehicles", written);
        Ok(written)
    }

    async fn cached<T: DeserializeOwned + Send>(&self, key: Option<&str>) -> Option<T> {
        let (Some(cache), Some(key)) = (&self.cache, key) else {
            return None;
        };

        match cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("⚠️ Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    async fn remember<T: Serialize + Send + Sync>(&self, key: Option<&str>, value: &T) {
        let (Some(cache), Some(key)) = (&self.cache, key) else {
            return;
        };

        if let Err(e) = cache.set(key, value, cache.default_ttl()).await {
            warn!("⚠️ Cache write failed for {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MemoryRecordStore;
    use serde_json::json;

    fn repository(store: MemoryRecordStore) -> InventoryRepository {
        InventoryRepository::new(Arc::new(store), DatabaseConfig::default(), None)
    }

    #[tokio::test]
    async fn test_snapshot_of_missing_node_is_empty() {
        let snapshot = repository(MemoryRecordStore::new()).snapshot().await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_stock_num() {
        let repo = repository(MemoryRecordStore::with_node(
            "inventory",
            json!({ "A1": { "Make": "Toyota" }, "B2": "garbage" }),
        ));

        let found = repo.find_by_stock_num("A1").await.unwrap().unwrap();
        assert_eq!(found.stock_num(), Some("A1"));
        assert!(repo.find_by_stock_num("B2").await.unwrap().is_none());
        assert!(repo.find_by_stock_num("C3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_in_array_inventory() {
        let repo = repository(MemoryRecordStore::with_node(
            "inventory",
            json!([{ "StockNum": "A1", "Make": "Toyota" }, { "StockNum": "B2", "Make": "Ford" }]),
        ));

        let found = repo.find_by_stock_num("B2").await.unwrap().unwrap();
        assert_eq!(found.make.as_deref(), Some("Ford"));
    }

    #[tokio::test]
    async fn test_metadata_round_trip_through_store() {
        let repo = repository(MemoryRecordStore::new());
        assert!(repo.fetch_metadata().await.unwrap().is_none());

        let mut metadata = InventoryMetadata::default();
        metadata.makes.insert("Toyota".to_string(), 2);
        metadata.model_years.insert("2020".to_string(), 2);
        repo.save_metadata(&metadata).await.unwrap();

        assert_eq!(repo.fetch_metadata().await.unwrap(), Some(metadata));
    }

    #[tokio::test]
    async fn test_unreadable_metadata_is_ignored() {
        let repo = repository(MemoryRecordStore::with_node(
            "inventory_metadata",
            json!({ "Makes": "lots" }),
        ));
        assert!(repo.fetch_metadata().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_inventory_keys_by_stock_num() {
        let repo = repository(MemoryRecordStore::new());
        let mut anonymous = Vehicle::with_stock_num("x");
        anonymous.stock_num = None;

        let written = repo
            .replace_inventory(&[Vehicle::with_stock_num("A1"), anonymous])
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert_eq!(repo.snapshot().await.unwrap().len(), 1);
    }
}
