//! Content catalog held in memory.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use serde_json::Value;

use crate::domain::entities::{Page, PageRevision, Redirect, StructureConfig};
use crate::domain::repositories::{ContentApi, ContentCatalog};
use crate::error::AppError;

/// Catalog contents as stored in a snapshot file.
///
/// ```json
/// {
///   "pages": [{"id": 1, "url": "home", "type": "page", "published": true,
///              "template": {"id": 1, "controller": null}}],
///   "revisions": [{"id": 3, "page_id": 1, "content": {}}],
///   "redirects": [{"id": 1, "source_url": "old", "target_url": "/home", "type": 301}],
///   "structures": [{"id": 9, "previewController": "Catalog@preview"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub revisions: Vec<PageRevision>,
    #[serde(default)]
    pub redirects: Vec<Redirect>,
    #[serde(default)]
    pub structures: Vec<StructureConfig>,
}

/// [`ContentCatalog`] over a fixed set of pages, revisions and redirects.
///
/// Serves offline deployments configured with `CONTENT_SNAPSHOT` and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    snapshot: CatalogSnapshot,
}

impl InMemoryCatalog {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            snapshot: CatalogSnapshot {
                pages,
                ..Default::default()
            },
        }
    }

    pub fn with_revisions(mut self, revisions: Vec<PageRevision>) -> Self {
        self.snapshot.revisions = revisions;
        self
    }

    pub fn with_redirects(mut self, redirects: Vec<Redirect>) -> Self {
        self.snapshot.redirects = redirects;
        self
    }

    pub fn with_structures(mut self, structures: Vec<StructureConfig>) -> Self {
        self.snapshot.structures = structures;
        self
    }

    /// Loads a catalog from a JSON snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_snapshot_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content snapshot {}", path.display()))?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid content snapshot {}", path.display()))?;

        Ok(Self { snapshot })
    }
}

#[async_trait]
impl ContentCatalog for InMemoryCatalog {
    async fn all_pages(&self) -> Result<Vec<Page>, AppError> {
        Ok(self.snapshot.pages.clone())
    }

    async fn find_page(&self, id: i64) -> Result<Option<Page>, AppError> {
        Ok(self.snapshot.pages.iter().find(|p| p.id == id).cloned())
    }

    async fn find_revision(
        &self,
        page_id: i64,
        revision_id: i64,
    ) -> Result<Option<PageRevision>, AppError> {
        Ok(self
            .snapshot
            .revisions
            .iter()
            .find(|r| r.page_id == page_id && r.id == revision_id)
            .cloned())
    }

    async fn all_redirects(&self) -> Result<Vec<Redirect>, AppError> {
        Ok(self.snapshot.redirects.clone())
    }
}

/// Serves `builder/structures/{id}` from the snapshot so offline
/// deployments can preview entries. Every other path is absent.
#[async_trait]
impl ContentApi for InMemoryCatalog {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let structure = path
            .trim_matches('/')
            .strip_prefix("builder/structures/")
            .and_then(|id| id.parse::<i64>().ok())
            .and_then(|id| self.snapshot.structures.iter().find(|s| s.id == id));

        match structure {
            Some(config) => serde_json::to_value(config).map_err(|e| {
                AppError::internal(
                    "Failed to encode structure",
                    serde_json::json!({ "reason": e.to_string() }),
                )
            }),
            None => Ok(Value::Null),
        }
    }
}
