//! Clients - stores behind the inventory
//!
//! The record store holds vehicle documents and the metadata snapshot; the
//! blob store holds vehicle photos. Both are traits so the server can run
//! against the hosted services or the in-memory stores used by tests.

pub mod firebase_database;
pub mod firebase_storage;
pub mod memory_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use firebase_database::FirebaseDatabaseClient;
pub use firebase_storage::FirebaseStorageClient;
pub use memory_store::{MemoryBlobStore, MemoryRecordStore};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Object {0} has no download token")]
    MissingToken(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Key → JSON document store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Document at `path`, `None` when absent
    async fn get(&self, path: &str) -> ClientResult<Option<Value>>;

    /// Replace the document at `path`
    async fn set(&self, path: &str, value: &Value) -> ClientResult<()>;
}

/// Object in the blob store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredObject {
    /// Full object path, e.g. `inventory/A100/1.jpg`
    pub full_path: String,
}

impl StoredObject {
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
        }
    }

    /// Last path segment
    pub fn name(&self) -> &str {
        self.full_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.full_path)
    }
}

/// Listing and URL resolution for stored photos
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Objects directly under `prefix`, at most `max_results`
    async fn list(&self, prefix: &str, max_results: usize) -> ClientResult<Vec<StoredObject>>;

    /// Public download URL of one object
    async fn download_url(&self, object: &StoredObject) -> ClientResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name() {
        assert_eq!(StoredObject::new("inventory/A1/2.jpg").name(), "2.jpg");
        assert_eq!(StoredObject::new("front.jpg").name(), "front.jpg");
    }
}
