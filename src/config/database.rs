//! Record store and blob store configuration
//!
//! The record store is a realtime JSON database reached over REST; the blob
//! store holds vehicle photos under one folder per stock number.

use std::time::Duration;

use super::environment::{optional, parsed, required, ConfigError};

/// Record store configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_secret: Option<String>,
    pub inventory_path: String,
    pub metadata_path: String,
    pub request_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000".to_string(),
            auth_secret: None,
            inventory_path: "inventory".to_string(),
            metadata_path: "inventory_metadata".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl DatabaseConfig {
    /// Load from the process environment (used by the maintenance tools)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let url = required(&lookup, "DATABASE_URL")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                expected: "http(s) URL",
                value: url,
            });
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            auth_secret: optional(&lookup, "DATABASE_AUTH"),
            inventory_path: optional(&lookup, "DATABASE_INVENTORY")
                .unwrap_or(defaults.inventory_path),
            metadata_path: optional(&lookup, "DATABASE_INVENTORY_METADATA")
                .unwrap_or(defaults.metadata_path),
            request_timeout: Duration::from_secs(parsed(&lookup, "DATABASE_TIMEOUT", 10u64)?),
        })
    }

    /// Path of a single inventory record
    pub fn record_path(&self, stock_num: &str) -> String {
        format!("{}/{}", self.inventory_path, stock_num)
    }
}

/// Blob store configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub base_url: String,
    pub bucket: String,
    pub inventory_prefix: String,
    pub image_limit: usize,
    /// Vehicles resolved at once when enriching many records
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firebasestorage.googleapis.com".to_string(),
            bucket: "dealership.appspot.com".to_string(),
            inventory_prefix: "inventory".to_string(),
            image_limit: 10,
            concurrency: 8,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl StorageConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let image_limit: usize = parsed(&lookup, "STORAGE_IMAGE_LIMIT", defaults.image_limit)?;
        let concurrency: usize = parsed(&lookup, "STORAGE_CONCURRENCY", defaults.concurrency)?;
        for (key, value) in [("STORAGE_IMAGE_LIMIT", image_limit), ("STORAGE_CONCURRENCY", concurrency)] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    expected: "positive number",
                    value: "0".to_string(),
                });
            }
        }

        Ok(Self {
            base_url: optional(&lookup, "STORAGE_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            bucket: required(&lookup, "STORAGE_BUCKET")?,
            inventory_prefix: optional(&lookup, "STORAGE_INVENTORY")
                .unwrap_or(defaults.inventory_prefix),
            image_limit,
            concurrency,
            request_timeout: Duration::from_secs(parsed(&lookup, "STORAGE_TIMEOUT", 10u64)?),
        })
    }

    /// Folder holding a vehicle's photos
    pub fn vehicle_prefix(&self, stock_num: &str) -> String {
        format!("{}/{}/", self.inventory_prefix, stock_num)
    }
}
