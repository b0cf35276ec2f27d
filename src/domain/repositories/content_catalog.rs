//! Read-only view over the content catalog.

use crate::domain::entities::{Page, PageRevision, Redirect};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for pages, revisions and redirects.
///
/// Pages returned by [`ContentCatalog::find_page`] are owned copies, so a
/// preview may load a revision onto one without touching the boot snapshot.
///
/// # Implementations
///
/// - [`crate::infrastructure::content::ApiContentCatalog`] - Content API backed
/// - [`crate::infrastructure::content::InMemoryCatalog`] - Fixed page set or JSON snapshot
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// Returns every page, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the catalog cannot be read.
    async fn all_pages(&self) -> Result<Vec<Page>, AppError>;

    /// Finds a page by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Page))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the catalog cannot be read.
    async fn find_page(&self, id: i64) -> Result<Option<Page>, AppError>;

    /// Finds a specific revision of a page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the catalog cannot be read.
    async fn find_revision(
        &self,
        page_id: i64,
        revision_id: i64,
    ) -> Result<Option<PageRevision>, AppError>;

    /// Returns every redirect, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the catalog cannot be read.
    async fn all_redirects(&self) -> Result<Vec<Redirect>, AppError>;
}
