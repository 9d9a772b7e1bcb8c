//! Realtime database REST client
//!
//! `GET {url}/{path}.json` reads a node (JSON `null` when absent),
//! `PUT` replaces it. The optional database secret goes in `auth`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{ClientError, ClientResult, RecordStore};
use crate::config::DatabaseConfig;

pub struct FirebaseDatabaseClient {
    client: Client,
    base_url: String,
    auth_secret: Option<String>,
}

impl FirebaseDatabaseClient {
    pub fn new(config: &DatabaseConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            auth_secret: config.auth_secret.clone(),
        })
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_secret {
            Some(secret) => request.query(&[("auth", secret)]),
            None => request,
        }
    }
}

#[async_trait]
impl RecordStore for FirebaseDatabaseClient {
    async fn get(&self, path: &str) -> ClientResult<Option<Value>> {
        let url = self.node_url(path);
        log::debug!("📡 GET {}", url);

        let response = self.with_auth(self.client.get(&url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            log::error!("❌ Record store answered {} for {}", status, url);
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        match response.json::<Value>().await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    async fn set(&self, path: &str, value: &Value) -> ClientResult<()> {
        let url = self.node_url(path);
        log::info!("💾 PUT {}", url);

        let response = self
            .with_auth(self.client.put(&url))
            .json(value)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            log::error!("❌ Record store rejected write to {}: {}", url, status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_url() {
        let config = DatabaseConfig {
            url: "https://dealer.firebaseio.com".to_string(),
            ..DatabaseConfig::default()
        };
        let client = FirebaseDatabaseClient::new(&config).unwrap();
        assert_eq!(
            client.node_url("/inventory/A1/"),
            "https://dealer.firebaseio.com/inventory/A1.json"
        );
    }
}
