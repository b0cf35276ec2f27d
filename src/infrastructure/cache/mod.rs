//! Caching layer for structure configurations.
//!
//! Provides a [`StructureCache`] trait with two implementations:
//! - [`MemoryCache`] - In-process map, the default
//! - [`RedisCache`] - Shared Redis store for multi-instance deployments

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, StructureCache};

#[cfg(test)]
pub use service::MockStructureCache;
