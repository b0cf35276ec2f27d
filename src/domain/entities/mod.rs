//! Core domain entities.
//!
//! Entities are plain data structures read from the content catalog or
//! produced while building the route table.
//!
//! # Entity Types
//!
//! - [`Page`] / [`Template`] / [`PageRevision`] - Catalog pages
//! - [`Redirect`] - Catalog-managed redirects
//! - [`StructureConfig`] - Entry type configuration from the content API
//! - [`RouteDefinition`] / [`RegisteredRoute`] / [`RouteKey`] - Dynamic routes
//! - [`PreviewPayload`] - Editor preview request

pub mod page;
pub mod preview;
pub mod redirect;
pub mod route;
pub mod structure;

pub use page::{Page, PageRevision, ROUTABLE_PAGE_TYPE, Template};
pub use preview::{DEFAULT_MODE, PreviewPayload, Relation};
pub use redirect::Redirect;
pub use route::{RegisteredRoute, RouteDefinition, RouteKey, SUPPORTED_METHODS};
pub use structure::{ControllerAction, StructureConfig};
