//! Structure cache trait and error types.

use async_trait::async_trait;

use crate::domain::entities::StructureConfig;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Permanent store for structure configurations, keyed by structure id.
///
/// Entries never expire and are never invalidated. Writes for the same id
/// always carry identical content, so concurrent first writes may race.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process map
/// - [`crate::infrastructure::cache::RedisCache`] - Redis keys without TTL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructureCache: Send + Sync {
    /// Looks up a stored structure configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open behavior)
    async fn get_structure(&self, structure_id: i64) -> CacheResult<Option<StructureConfig>>;

    /// Stores a structure configuration forever.
    ///
    /// # Errors
    ///
    /// Should not propagate backend errors; a failed write only costs a
    /// later refetch.
    async fn put_structure(&self, structure_id: i64, config: &StructureConfig) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
