//! Site route configuration: dynamic page routes, redirects, robots and
//! sitemap.
//!
//! Routes are mounted in a fixed order: peripheral routes and any paths
//! reserved by the caller first, then catalog redirects, then the page route
//! table in catalog order. A route whose path or methods are already taken
//! is skipped with a warning, so a redirect shadows a page route at the same
//! path.

use std::collections::HashMap;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    routing::{MethodFilter, MethodRouter, get, on},
};
use tracing::{debug, warn};

use crate::application::services::RouteTable;
use crate::domain::entities::{RegisteredRoute, Redirect};
use crate::state::AppState;
use crate::utils::route_path::validate_route_path;
use crate::web::handlers::{
    PageRouteTarget, RedirectTarget, page_route_handler, redirect_handler, robots_handler,
    sitemap_handler, sitemap_stylesheet_handler,
};

/// Methods a path has been claimed for. `None` claims every method.
type Claim = Option<Vec<Method>>;

/// Collects method routers per path and refuses registrations the router
/// would panic on.
///
/// Every new path is first inserted into a shadow `matchit` tree, the same
/// matcher the router uses, so conflicting shapes come back as errors
/// instead of aborting startup.
#[derive(Default)]
pub struct RouteMounter {
    order: Vec<String>,
    routers: HashMap<String, MethodRouter<AppState>>,
    claims: HashMap<String, Claim>,
    matcher: matchit::Router<()>,
}

impl RouteMounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims every method of `path` without routing it here.
    pub fn reserve(&mut self, path: &str) -> &mut Self {
        if let Err(e) = self.matcher.insert(path, ()) {
            debug!(path, error = %e, "Reserved path already matched");
        }
        self.claims.insert(path.to_string(), None);
        self
    }

    /// Mounts `router` at `path` for `methods`.
    ///
    /// Returns the reason the route was refused, if it was.
    pub fn mount(
        &mut self,
        path: &str,
        methods: &[Method],
        router: MethodRouter<AppState>,
    ) -> Result<(), String> {
        let relative = path
            .strip_prefix('/')
            .ok_or_else(|| "path must start with '/'".to_string())?;
        validate_route_path(relative).map_err(|e| e.to_string())?;

        match self.claims.get(path) {
            Some(None) => return Err("path is reserved".to_string()),
            Some(Some(claimed)) => {
                if let Some(method) = methods.iter().find(|m| claimed.contains(m)) {
                    return Err(format!("{method} already registered"));
                }
            }
            None => self.matcher.insert(path, ()).map_err(|e| e.to_string())?,
        }

        self.claims
            .entry(path.to_string())
            .or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .extend(methods.iter().cloned());

        let merged = match self.routers.remove(path) {
            Some(existing) => existing.merge(router),
            None => {
                self.order.push(path.to_string());
                router
            }
        };
        self.routers.insert(path.to_string(), merged);

        Ok(())
    }

    pub fn into_router(mut self) -> Router<AppState> {
        self.order.into_iter().fold(Router::new(), |app, path| {
            match self.routers.remove(&path) {
                Some(router) => app.route(&path, router),
                None => app,
            }
        })
    }
}

fn method_filter(methods: &[Method]) -> Option<MethodFilter> {
    let mut filters = methods.iter().map(|m| MethodFilter::try_from(m.clone()).ok());
    let first = filters.next()??;
    filters.try_fold(first, |acc, filter| filter.map(|f| acc.or(f)))
}

fn page_route(route: &RegisteredRoute, filter: MethodFilter) -> MethodRouter<AppState> {
    let target = PageRouteTarget::from(route);

    on(
        filter,
        move |state: State<AppState>,
              params: Option<Path<Vec<(String, String)>>>,
              method: Method,
              uri: Uri,
              headers: HeaderMap| {
            page_route_handler(target.clone(), state, params, method, uri, headers)
        },
    )
}

/// Builds the site router.
///
/// # Endpoints
///
/// - `GET /robots.txt` - Robots exclusion
/// - `GET /sitemap.xml` - Sitemap of routed pages
/// - `GET /sitemap.xsl` - Sitemap stylesheet
/// - `GET /{source_url}` for each redirect
/// - every route of `table`
///
/// `reserved` paths are left to other routers.
pub fn site_routes(table: &RouteTable, redirects: &[Redirect], reserved: &[&str]) -> Router<AppState> {
    let mut mounter = RouteMounter::new();

    for path in reserved {
        mounter.reserve(path);
    }

    let fixed: [(&str, MethodRouter<AppState>); 3] = [
        ("/robots.txt", get(robots_handler)),
        ("/sitemap.xml", get(sitemap_handler)),
        ("/sitemap.xsl", get(sitemap_stylesheet_handler)),
    ];
    for (path, router) in fixed {
        if let Err(reason) = mounter.mount(path, &[Method::GET], router) {
            warn!(path, reason, "Skipping fixed route");
        }
    }

    for redirect in redirects {
        let source = redirect.source_path();
        let path = format!("/{source}");

        if source.contains(['{', '}']) || validate_route_path(source).is_err() {
            warn!(path, redirect_id = redirect.id, "Skipping redirect with invalid source");
            continue;
        }

        let target = RedirectTarget::from(redirect);
        let router = get(move || redirect_handler(target.clone()));

        if let Err(reason) = mounter.mount(&path, &[Method::GET, Method::HEAD], router) {
            warn!(path, redirect_id = redirect.id, reason, "Skipping redirect");
        }
    }

    for route in &table.routes {
        let path = route.router_path();
        let methods: Vec<Method> = route
            .methods
            .iter()
            .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
            .collect();

        let Some(filter) = method_filter(&methods) else {
            warn!(path, name = %route.name, "Skipping route with unroutable methods");
            continue;
        };

        match mounter.mount(&path, &methods, page_route(route, filter)) {
            Ok(()) => debug!(path, handler = %route.handler(), "Mounted page route"),
            Err(reason) => warn!(path, name = %route.name, reason, "Skipping page route"),
        }
    }

    mounter.into_router()
}
