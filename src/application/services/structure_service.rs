//! Memoized lookup of structure configurations.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::entities::StructureConfig;
use crate::domain::repositories::ContentApi;
use crate::error::AppError;
use crate::infrastructure::cache::StructureCache;

/// Fetches structure configurations once and remembers them forever.
///
/// Only successful fetches are stored. Missing structures and upstream
/// failures are refetched on the next call. Concurrent first lookups of the
/// same id may both fetch; the stored value is the same either way.
pub struct StructureService {
    api: Arc<dyn ContentApi>,
    cache: Arc<dyn StructureCache>,
}

impl StructureService {
    pub fn new(api: Arc<dyn ContentApi>, cache: Arc<dyn StructureCache>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &Arc<dyn StructureCache> {
        &self.cache
    }

    /// Returns the configuration of `structure_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the API has no such structure,
    /// [`AppError::Upstream`] if the fetch fails or the body is not a
    /// structure configuration.
    pub async fn get_structure_config(&self, structure_id: i64) -> Result<StructureConfig, AppError> {
        match self.cache.get_structure(structure_id).await {
            Ok(Some(config)) => {
                metrics::counter!("structure_cache_hits_total").increment(1);
                return Ok(config);
            }
            Ok(None) => {}
            Err(e) => warn!(structure_id, error = %e, "Structure cache lookup failed"),
        }

        metrics::counter!("structure_cache_misses_total").increment(1);
        debug!(structure_id, "Fetching structure config");

        let raw = self
            .api
            .get(&format!("builder/structures/{structure_id}"))
            .await?;

        if raw.is_null() {
            return Err(AppError::not_found(
                "Structure not found",
                json!({ "structure_id": structure_id }),
            ));
        }

        let config = decode_structure(structure_id, raw)?;

        if let Err(e) = self.cache.put_structure(structure_id, &config).await {
            warn!(structure_id, error = %e, "Failed to store structure config");
        }

        Ok(config)
    }
}

fn decode_structure(structure_id: i64, raw: Value) -> Result<StructureConfig, AppError> {
    serde_json::from_value(raw).map_err(|e| {
        AppError::upstream(
            "Invalid structure config from content API",
            json!({ "structure_id": structure_id, "reason": e.to_string() }),
        )
    })
}
