use anyhow::Result;
use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use super::{CacheConfig, CacheOperations};

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    default_ttl: u64,
}

impl RedisClient {
    /// Conectar solo si hay una URL de Redis configurada
    pub async fn connect(config: &CacheConfig) -> Result<Option<Self>> {
        let Some(url) = config.redis_url.as_deref() else {
            info!("Cache disabled: REDIS_URL not set");
            return Ok(None);
        };

        info!("🔗 Conectando a Redis: {}", url);

        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Some(Self {
            manager,
            default_ttl: config.default_ttl,
        }))
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Generar clave de cache con prefijo
    fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("dealership:{}:{}", prefix, identifier)
    }

    pub fn inventory_key(&self, path: &str) -> String {
        self.make_key("inventory", path)
    }

    pub fn metadata_key(&self, path: &str) -> String {
        self.make_key("metadata", path)
    }
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.manager.clone();

        let value: redis::RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;

        match value {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                Ok(Some(serde_json::from_str(&value)?))
            }
            Ok(None) => {
                debug!("Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let serialized = serde_json::to_string(value)?;

        let result: redis::RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();

        let result: redis::RedisResult<i64> = redis::cmd("DEL").arg(key).query_async(&mut conn).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                // No fallar si no se puede eliminar
                warn!("⚠️ Error eliminando cache para clave {}: {}", key, e);
                Ok(())
            }
        }
    }
}
