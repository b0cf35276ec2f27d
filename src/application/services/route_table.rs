//! Dynamic route table built from the content catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::services::controller_registry::ControllerRegistry;
use crate::domain::entities::{Page, RegisteredRoute, RouteKey, SUPPORTED_METHODS};
use crate::error::AppError;
use crate::utils::route_path::{compose_route_path, validate_route_path};

/// Side table from route identity to the page that produced the route.
///
/// Populated while building and read-only afterwards, so handlers can look
/// up their page without touching the catalog.
#[derive(Debug, Clone, Default)]
pub struct RouteBindings {
    pages: HashMap<RouteKey, Arc<Page>>,
}

impl RouteBindings {
    pub fn bind(&mut self, key: RouteKey, page: Arc<Page>) {
        self.pages.insert(key, page);
    }

    pub fn resolve(&self, key: &RouteKey) -> Option<Arc<Page>> {
        self.pages.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// A page left out of the table because its routes could not be computed.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPage {
    pub page_id: i64,
    pub page_url: String,
    pub error: String,
}

/// Routes registered from a catalog snapshot, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    pub routes: Vec<RegisteredRoute>,
    pub bindings: RouteBindings,
    pub skipped: Vec<SkippedPage>,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Page bound to `route`, if the route came from this table.
    pub fn page_for(&self, route: &RegisteredRoute) -> Option<Arc<Page>> {
        self.bindings.resolve(&route.key())
    }

    /// Distinct pages that registered at least one route.
    pub fn pages(&self) -> Vec<Arc<Page>> {
        let mut seen = HashSet::new();
        let mut pages = Vec::new();

        for route in &self.routes {
            if let Some(page) = self.page_for(route)
                && seen.insert(page.id)
            {
                pages.push(page);
            }
        }

        pages
    }
}

/// Builds a [`RouteTable`] from catalog pages.
///
/// # Failure policy
///
/// A page's routes are computed completely before any of them are
/// registered, so a failure anywhere in one page leaves no partial routes
/// behind. With `strict` set the first failure aborts the build. Otherwise
/// the page is logged, counted and skipped, and building continues.
pub struct RouteTableBuilder {
    registry: Arc<ControllerRegistry>,
    strict: bool,
}

impl RouteTableBuilder {
    pub fn new(registry: Arc<ControllerRegistry>, strict: bool) -> Self {
        Self { registry, strict }
    }

    /// Builds the table for every routable page in `pages`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first error raised while resolving a
    /// page's controller or validating its routes. Never fails otherwise.
    pub fn build(&self, pages: &[Page]) -> Result<RouteTable, AppError> {
        let mut table = RouteTable::default();

        for page in pages.iter().filter(|p| p.is_routable()) {
            let page = Arc::new(page.clone());

            match self.routes_for(&page) {
                Ok(routes) => {
                    for route in routes {
                        debug!(path = %route.router_path(), handler = %route.handler(), "Registered route");
                        table.bindings.bind(route.key(), page.clone());
                        table.routes.push(route);
                    }
                }
                Err(e) if self.strict => return Err(e),
                Err(e) => {
                    warn!(page_url = %page.url, error = %e, "Skipping page with broken routes");
                    metrics::counter!("route_table_pages_skipped_total").increment(1);
                    table.skipped.push(SkippedPage {
                        page_id: page.id,
                        page_url: page.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            routes = table.routes.len(),
            skipped = table.skipped.len(),
            "Route table built"
        );

        Ok(table)
    }

    /// Computes every route of one page, or fails as a whole.
    fn routes_for(&self, page: &Page) -> Result<Vec<RegisteredRoute>, AppError> {
        let (controller, definitions) = self.registry.route_definitions(page)?;
        let name = page.id.to_string();

        definitions
            .into_iter()
            .map(|def| {
                let path = compose_route_path(&page.url, &def.url);

                validate_route_path(&path).map_err(|e| {
                    AppError::configuration(
                        e.to_string(),
                        json!({ "controller": controller, "path": path }),
                    )
                })?;

                if def.methods.is_empty() {
                    return Err(AppError::configuration(
                        "Route definition declares no methods",
                        json!({ "controller": controller, "path": path }),
                    ));
                }

                if let Some(method) = def
                    .methods
                    .iter()
                    .find(|m| !SUPPORTED_METHODS.contains(&m.as_str()))
                {
                    return Err(AppError::configuration(
                        format!("Unsupported method {method}"),
                        json!({ "controller": controller, "path": path }),
                    ));
                }

                if def.action.trim().is_empty() {
                    return Err(AppError::configuration(
                        "Route definition has no action",
                        json!({ "controller": controller, "path": path }),
                    ));
                }

                Ok(RegisteredRoute {
                    path,
                    methods: def.methods,
                    controller: controller.clone(),
                    action: def.action,
                    name: name.clone(),
                })
            })
            .collect()
    }
}
