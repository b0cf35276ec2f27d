//! # Page Router
//!
//! Dynamic routing for CMS-managed sites, built with Axum.
//!
//! At startup every routable page in the content catalog is turned into
//! routes through the controller named by its template. A single well-known
//! endpoint renders unpublished content for the editing tool from a signed
//! preview token.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, controller capability and content traits
//! - **Application Layer** ([`application`]) - Route table, structure and preview services
//! - **Infrastructure Layer** ([`infrastructure`]) - Content API client, catalogs and caches
//! - **API Layer** ([`api`]) - Preview endpoint, health check and middleware
//! - **Web Layer** ([`web`]) - Page routes, redirects, robots and sitemap
//!
//! ## Registering Controllers
//!
//! ```no_run
//! use page_router::{config, server, web::controllers::default_registry};
//!
//! # async fn start() -> anyhow::Result<()> {
//! let config = config::load_from_env()?;
//! let registry = default_registry(&config.controller_namespace);
//! // Application controllers are registered here before the table is built.
//! server::run_with_registry(config, registry).await
//! # }
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports the types an application needs to write and register
/// controllers.
pub mod prelude {
    pub use crate::application::services::{
        ControllerRegistry, PreviewService, RouteTableBuilder,
    };
    pub use crate::domain::entities::{Page, RouteDefinition};
    pub use crate::domain::{Controller, ControllerRequest, RenderContext};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
