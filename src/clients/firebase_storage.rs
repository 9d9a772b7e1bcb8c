//! Storage REST client
//!
//! Lists objects under a prefix and resolves token-based download URLs from
//! object metadata, the same URLs the web console hands out.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{BlobStore, ClientError, ClientResult, StoredObject};
use crate::config::StorageConfig;

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<ListItem>,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectMetadata {
    #[serde(rename = "downloadTokens")]
    download_tokens: Option<String>,
}

pub struct FirebaseStorageClient {
    client: Client,
    base_url: String,
    bucket: String,
}

impl FirebaseStorageClient {
    pub fn new(config: &StorageConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            bucket: config.bucket.clone(),
        })
    }

    fn objects_url(&self) -> String {
        format!("{}/v0/b/{}/o", self.base_url, self.bucket)
    }

    fn object_url(&self, full_path: &str) -> String {
        format!("{}/{}", self.objects_url(), urlencoding::encode(full_path))
    }
}

#[async_trait]
impl BlobStore for FirebaseStorageClient {
    async fn list(&self, prefix: &str, max_results: usize) -> ClientResult<Vec<StoredObject>> {
        let url = self.objects_url();
        log::debug!("🖼️ Listing {} in bucket {}", prefix, self.bucket);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("prefix", prefix.to_string()),
                ("delimiter", "/".to_string()),
                ("maxResults", max_results.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let listing: ListResponse = response.json().await?;
        Ok(listing
            .items
            .into_iter()
            .take(max_results)
            .map(|item| StoredObject::new(item.name))
            .collect())
    }

    async fn download_url(&self, object: &StoredObject) -> ClientResult<String> {
        let url = self.object_url(&object.full_path);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let metadata: ObjectMetadata = response.json().await?;
        let token = metadata
            .download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').next())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::MissingToken(object.full_path.clone()))?;

        Ok(format!("{}?alt=media&token={}", url, token))
    }
}
