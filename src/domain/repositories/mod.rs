//! Collaborator trait definitions for the domain layer.
//!
//! These traits abstract the content store so the route table builder and the
//! preview resolver never depend on a concrete transport.
//!
//! # Architecture
//!
//! - Traits define the contract for content access
//! - Implementations live in `crate::infrastructure::content`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Traits
//!
//! - [`ContentCatalog`] - Pages, revisions and redirects
//! - [`ContentApi`] - Raw JSON access to the content API

pub mod content_api;
pub mod content_catalog;

pub use content_api::ContentApi;
pub use content_catalog::ContentCatalog;

#[cfg(test)]
pub use content_api::MockContentApi;
#[cfg(test)]
pub use content_catalog::MockContentCatalog;
