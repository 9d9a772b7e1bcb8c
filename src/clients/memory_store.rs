//! In-memory stores
//!
//! Back the service in tests and local runs without cloud credentials.
//! Paths are split on `/` and walked through nested JSON objects, the way the
//! realtime database addresses its tree.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{BlobStore, ClientError, ClientResult, RecordStore, StoredObject};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    root: RwLock<Value>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Null),
        }
    }

    /// Store pre-populated with one node
    pub fn with_node(path: &str, value: Value) -> Self {
        let mut root = Value::Null;
        write_node(&mut root, path, value);
        Self {
            root: RwLock::new(root),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn read_node<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(root, |node, key| match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn write_node(root: &mut Value, path: &str, value: Value) {
    let mut node = root;
    for key in segments(path) {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
            _ => return,
        };
    }
    *node = value;
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get(&self, path: &str) -> ClientResult<Option<Value>> {
        let root = self.root.read().await;
        Ok(read_node(&root, path)
            .filter(|node| !node.is_null())
            .cloned())
    }

    async fn set(&self, path: &str, value: &Value) -> ClientResult<()> {
        let mut root = self.root.write().await;
        write_node(&mut root, path, value.clone());
        Ok(())
    }
}

/// Blob store keyed by full object path
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: BTreeMap<String, String>,
    broken: HashSet<String>,
    unavailable: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, full_path: impl Into<String>, url: impl Into<String>) -> Self {
        self.objects.insert(full_path.into(), url.into());
        self
    }

    /// Object that lists but whose URL cannot be resolved
    pub fn with_broken_object(mut self, full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        self.objects.insert(full_path.clone(), String::new());
        self.broken.insert(full_path);
        self
    }

    /// Every listing fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list(&self, prefix: &str, max_results: usize) -> ClientResult<Vec<StoredObject>> {
        if self.unavailable {
            return Err(ClientError::Unavailable("blob store offline".to_string()));
        }

        Ok(self
            .objects
            .keys()
            .filter(|path| {
                path.strip_prefix(prefix)
                    .map_or(false, |rest| !rest.is_empty() && !rest.contains('/'))
            })
            .take(max_results)
            .map(StoredObject::new)
            .collect())
    }

    async fn download_url(&self, object: &StoredObject) -> ClientResult<String> {
        if self.broken.contains(&object.full_path) {
            return Err(ClientError::MissingToken(object.full_path.clone()));
        }

        self.objects
            .get(&object.full_path)
            .cloned()
            .ok_or_else(|| ClientError::Unavailable(format!("no object {}", object.full_path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_record_store_nested_paths() {
        let store = MemoryRecordStore::new();
        store
            .set("inventory/A1", &json!({ "Make": "Toyota" }))
            .await
            .unwrap();

        assert_eq!(
            store.get("inventory").await.unwrap(),
            Some(json!({ "A1": { "Make": "Toyota" } }))
        );
        assert_eq!(
            store.get("inventory/A1/Make").await.unwrap(),
            Some(json!("Toyota"))
        );
        assert_eq!(store.get("inventory/B2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_node() {
        let store = MemoryRecordStore::with_node("inventory_metadata", json!({ "Makes": {} }));
        store.set("inventory_metadata", &json!(null)).await.unwrap();
        assert_eq!(store.get("inventory_metadata").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blob_listing_is_one_level_deep() {
        let store = MemoryBlobStore::new()
            .with_object("inventory/A1/1.jpg", "https://img/1")
            .with_object("inventory/A1/2.jpg", "https://img/2")
            .with_object("inventory/A1/thumbs/1.jpg", "https://img/t1")
            .with_object("inventory/A10/1.jpg", "https://img/x");

        let listed = store.list("inventory/A1/", 10).await.unwrap();
        let names: Vec<&str> = listed.iter().map(StoredObject::name).collect();
        assert_eq!(names, vec!["1.jpg", "2.jpg"]);

        assert_eq!(store.list("inventory/A1/", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_broken_object_fails_resolution() {
        let store = MemoryBlobStore::new().with_broken_object("inventory/A1/1.jpg");
        let object = StoredObject::new("inventory/A1/1.jpg");
        assert!(store.download_url(&object).await.is_err());
    }
}
