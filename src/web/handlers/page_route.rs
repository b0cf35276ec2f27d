//! Handler behind every dynamically registered page route.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use serde_json::json;

use crate::domain::controller::ControllerRequest;
use crate::domain::entities::{RegisteredRoute, RouteKey};
use crate::domain::render_context::RenderContext;
use crate::error::AppError;
use crate::state::AppState;

/// What a mounted route dispatches to.
#[derive(Debug, Clone)]
pub struct PageRouteTarget {
    pub key: RouteKey,
    pub controller: String,
    pub action: String,
}

impl From<&RegisteredRoute> for PageRouteTarget {
    fn from(route: &RegisteredRoute) -> Self {
        Self {
            key: route.key(),
            controller: route.controller.clone(),
            action: route.action.clone(),
        }
    }
}

/// Invokes the route's controller action for its bound page.
///
/// The page comes from the route table's binding side table, never from
/// the catalog. Route parameters are passed as positional arguments in
/// path order.
///
/// # Errors
///
/// Returns 404 if the route has no bound page or the controller cannot be
/// resolved, and whatever the controller action returns otherwise.
pub async fn page_route_handler(
    target: PageRouteTarget,
    State(state): State<AppState>,
    params: Option<Path<Vec<(String, String)>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = state.route_table.bindings.resolve(&target.key).ok_or_else(|| {
        AppError::not_found("No page bound to route", json!({ "route": target.key.as_str() }))
    })?;

    let controller = state.registry.instantiate(&target.controller)?;
    let context = RenderContext::live().with_page(page);

    let args = params
        .map(|Path(params)| params.into_iter().map(|(_, value)| Some(value)).collect())
        .unwrap_or_default();

    let request = ControllerRequest {
        context: context.clone(),
        method,
        uri,
        headers,
        args,
    };

    let mut response = controller.call(&target.action, request).await?;
    response.extensions_mut().insert(context);
    Ok(response)
}
