//! In-process structure cache.

use super::service::{CacheResult, StructureCache};
use crate::domain::entities::StructureConfig;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Append-only concurrent map of structure configurations.
///
/// Used when Redis is not configured or unreachable at startup.
#[derive(Clone, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<i64, StructureConfig>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using in-process structure cache");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl StructureCache for MemoryCache {
    async fn get_structure(&self, structure_id: i64) -> CacheResult<Option<StructureConfig>> {
        Ok(self.inner.get(&structure_id).map(|entry| entry.value().clone()))
    }

    async fn put_structure(&self, structure_id: i64, config: &StructureConfig) -> CacheResult<()> {
        self.inner.insert(structure_id, config.clone());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
