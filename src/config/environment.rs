//! Environment configuration
//!
//! Every setting is read once at startup into `EnvironmentConfig` and
//! validated there. Components receive the struct (or the part they need);
//! nothing else reads the process environment.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use super::database::{DatabaseConfig, StorageConfig};
use crate::cache::CacheConfig;
use crate::services::inventory_query_engine::EngineConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Outbound mail settings
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub company_email: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: "sales@dealership.test".to_string(),
            password: String::new(),
            company_email: "leads@dealership.test".to_string(),
        }
    }
}

/// Dealership identity, used by the syndication feed and lead emails
#[derive(Debug, Clone)]
pub struct DealershipConfig {
    pub name: String,
    pub address: String,
    pub store_code: String,
    pub place_id: String,
    pub application_url: String,
    pub currency: String,
}

impl Default for DealershipConfig {
    fn default() -> Self {
        Self {
            name: "Dealership".to_string(),
            address: String::new(),
            store_code: String::new(),
            place_id: String::new(),
            application_url: "http://localhost:3000".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl DealershipConfig {
    /// Public page of a vehicle
    pub fn listing_url(&self, stock_num: &str) -> String {
        format!("{}/inventory/{}", self.application_url, stock_num)
    }
}

/// Process-wide settings
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub pagination_limit: usize,
    pub search_limit: usize,
    pub recommendation_limit: usize,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub dealership: DealershipConfig,
    pub cache: CacheConfig,
}

/// Development defaults; no environment access
impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            rate_limit_requests: 5,
            rate_limit_window: 15,
            pagination_limit: 10,
            search_limit: 5,
            recommendation_limit: 3,
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            mail: MailConfig::default(),
            dealership: DealershipConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            environment: optional(&lookup, "ENVIRONMENT").unwrap_or(defaults.environment),
            host: optional(&lookup, "HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "SERVER_PORT", defaults.port)?,
            cors_origins: optional(&lookup, "CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_requests: parsed(&lookup, "RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: parsed(&lookup, "RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            pagination_limit: parsed(&lookup, "PAGINATION_LIMIT", defaults.pagination_limit)?,
            search_limit: parsed(&lookup, "SEARCH_LIMIT", defaults.search_limit)?,
            recommendation_limit: parsed(&lookup, "RECOMMENDATION_LIMIT", defaults.recommendation_limit)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup)?,
            mail: MailConfig {
                host: required(&lookup, "EMAIL_HOST")?,
                port: parsed(&lookup, "EMAIL_PORT", defaults.mail.port)?,
                username: required(&lookup, "EMAIL_USERNAME")?,
                password: optional(&lookup, "EMAIL_PASSWORD").unwrap_or_default(),
                company_email: required(&lookup, "COMPANY_EMAIL")?,
            },
            dealership: DealershipConfig {
                name: optional(&lookup, "DEALERSHIP_NAME").unwrap_or(defaults.dealership.name),
                address: optional(&lookup, "DEALERSHIP_ADDRESS").unwrap_or_default(),
                store_code: optional(&lookup, "STORE_CODE").unwrap_or_default(),
                place_id: optional(&lookup, "PLACE_ID").unwrap_or_default(),
                application_url: required(&lookup, "APPLICATION_URL")?
                    .trim_end_matches('/')
                    .to_string(),
                currency: optional(&lookup, "CURRENCY").unwrap_or(defaults.dealership.currency),
            },
            cache: CacheConfig {
                redis_url: optional(&lookup, "REDIS_URL"),
                default_ttl: parsed(&lookup, "CACHE_TTL", defaults.cache.default_ttl)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("RATE_LIMIT_REQUESTS", self.rate_limit_requests as u64),
            ("RATE_LIMIT_WINDOW", self.rate_limit_window),
            ("PAGINATION_LIMIT", self.pagination_limit as u64),
            ("SEARCH_LIMIT", self.search_limit as u64),
        ];

        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    expected: "positive number",
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            default_limit: self.pagination_limit,
            search_limit: self.search_limit,
            recommendation_limit: self.recommendation_limit,
        }
    }

    /// True when running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Value of `key`, blank counts as unset
pub(crate) fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

pub(crate) fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match optional(lookup, key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            expected: "number",
            value: raw,
        }),
    }
}
