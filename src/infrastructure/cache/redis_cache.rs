//! Redis-backed structure cache.

use super::service::{CacheError, CacheResult, StructureCache};
use crate::domain::entities::StructureConfig;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache shared between service instances.
///
/// Keys are written without TTL. All operations are fail-open: errors are
/// logged and reported as misses or ignored writes.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "structure:".to_string(),
        })
    }

    fn build_key(&self, structure_id: i64) -> String {
        format!("{}{}", self.key_prefix, structure_id)
    }
}

#[async_trait]
impl StructureCache for RedisCache {
    async fn get_structure(&self, structure_id: i64) -> CacheResult<Option<StructureConfig>> {
        let key = self.build_key(structure_id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(config) => {
                    debug!("Cache HIT: structure {}", structure_id);
                    Ok(Some(config))
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: structure {}", structure_id);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn put_structure(&self, structure_id: i64, config: &StructureConfig) -> CacheResult<()> {
        let key = self.build_key(structure_id);
        let raw = serde_json::to_string(config)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        let mut conn = self.client.clone();

        match conn.set::<_, _, ()>(&key, raw).await {
            Ok(_) => {
                debug!("Cache SET: structure {}", structure_id);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
