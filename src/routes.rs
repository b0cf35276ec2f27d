//! Top-level router configuration combining the preview proxy, health and
//! site routes.
//!
//! # Route Structure
//!
//! - `ANY  /.well-known/netflex` - Editor preview (signed token required)
//! - `GET  /health`              - Route table and cache health (public)
//! - `GET  /robots.txt`, `/sitemap.xml`, `/sitemap.xsl`
//! - catalog redirects
//! - dynamic page routes from the route table
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the preview endpoint
//! - **Token verification** - [`crate::api::middleware::jwt_proxy`]
//!
//! Trailing slashes are trimmed by the server before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::api::routes::PREVIEW_PATH;
use crate::domain::entities::Redirect;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;

pub const HEALTH_PATH: &str = "/health";

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state; its route table is mounted here
/// - `redirects` - catalog redirects, mounted ahead of the page routes
/// - `behind_proxy` - when `true`, preview rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, redirects: &[Redirect], behind_proxy: bool) -> Router {
    let site = web::routes::site_routes(
        &state.route_table,
        redirects,
        &[HEALTH_PATH, PREVIEW_PATH],
    );

    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .merge(api::routes::preview_routes(state.clone(), behind_proxy))
        .merge(site)
        .with_state(state)
        .layer(tracing::layer())
}
