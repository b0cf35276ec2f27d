//! Editor preview route configuration.
//!
//! The preview endpoint is reachable only through
//! [`crate::api::middleware::jwt_proxy`].

use crate::api::handlers::preview_handler;
use crate::api::middleware::{jwt_proxy, rate_limit};
use crate::state::AppState;
use axum::{Router, middleware, routing::any};

/// Well-known path the editing tool sends preview requests to.
pub const PREVIEW_PATH: &str = "/.well-known/netflex";

/// The trusted preview route, token-verified and rate-limited per client IP.
///
/// With `behind_proxy` the client IP comes from forwarding headers instead
/// of the peer address.
///
/// # Endpoints
///
/// - `ANY /.well-known/netflex` - Render a page or entry preview
pub fn preview_routes(state: AppState, behind_proxy: bool) -> Router<AppState> {
    let routes = Router::new()
        .route(PREVIEW_PATH, any(preview_handler))
        .route_layer(middleware::from_fn_with_state(state, jwt_proxy::layer));

    if behind_proxy {
        routes.layer(rate_limit::proxied_preview_layer())
    } else {
        routes.layer(rate_limit::preview_layer())
    }
}
