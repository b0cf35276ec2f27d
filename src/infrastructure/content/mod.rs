//! Content store integrations.
//!
//! - [`HttpContentApi`] - `reqwest` client for the remote content API
//! - [`ApiContentCatalog`] - Catalog assembled from content API resources
//! - [`InMemoryCatalog`] - Fixed catalog, optionally loaded from a JSON snapshot

mod api_catalog;
mod http_client;
mod memory_catalog;

pub use api_catalog::ApiContentCatalog;
pub use http_client::HttpContentApi;
pub use memory_catalog::{CatalogSnapshot, InMemoryCatalog};
