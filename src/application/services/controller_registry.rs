//! Late-bound controller resolution by name.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::controller::Controller;
use crate::domain::entities::{Page, RouteDefinition};
use crate::error::AppError;

/// Namespace template controller names are resolved in by default.
pub const DEFAULT_NAMESPACE: &str = "app::controllers";

/// Symbol of the built-in controller used by pages without a controller.
pub const PAGE_CONTROLLER: &str = "pages::PageController";

/// Builds a controller instance; may fail like a constructor.
pub type ControllerFactory = Arc<dyn Fn() -> Result<Arc<dyn Controller>, AppError> + Send + Sync>;

/// A controller instance together with the symbol it was resolved from.
#[derive(Clone)]
pub struct ResolvedController {
    pub symbol: String,
    pub controller: Arc<dyn Controller>,
}

/// Maps fully qualified controller symbols to factories.
///
/// Names from templates and structure configs are qualified with the
/// registry's namespace. A factory runs on every resolution, so controllers
/// and the routes they declare are never cached.
#[derive(Clone)]
pub struct ControllerRegistry {
    namespace: String,
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into().trim_matches(':').to_string(),
            factories: HashMap::new(),
        }
    }

    /// Registers an infallible controller under `name` within the namespace.
    pub fn register<F, C>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        self.register_with(name, move || Ok(Arc::new(factory()) as Arc<dyn Controller>))
    }

    /// Registers a controller whose construction may fail.
    pub fn register_with<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn Controller>, AppError> + Send + Sync + 'static,
    {
        let symbol = self.qualify(name).unwrap_or_else(|| self.namespace.clone());
        self.factories.insert(symbol, Arc::new(factory));
        self
    }

    /// Registers a controller under an already qualified symbol.
    pub fn register_qualified<F, C>(&mut self, symbol: &str, factory: F) -> &mut Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Controller + 'static,
    {
        self.factories.insert(
            symbol.trim_matches(':').to_string(),
            Arc::new(move || Ok(Arc::new(factory()) as Arc<dyn Controller>)),
        );
        self
    }

    /// Qualifies a controller name with the namespace.
    ///
    /// Returns `None` for blank names.
    pub fn qualify(&self, name: &str) -> Option<String> {
        let name = name.trim().trim_matches(':');
        if name.is_empty() {
            return None;
        }

        if self.namespace.is_empty() {
            Some(name.to_string())
        } else {
            Some(format!("{}::{}", self.namespace, name))
        }
    }

    /// Symbol of the controller handling `page`.
    ///
    /// Pure string composition; no controller is constructed.
    pub fn symbol_for(&self, page: &Page) -> String {
        page.controller()
            .and_then(|name| self.qualify(name))
            .unwrap_or_else(|| PAGE_CONTROLLER.to_string())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.factories.contains_key(symbol)
    }

    /// Constructs the controller registered under `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if nothing is registered under the
    /// symbol, or the factory's own error if construction fails.
    pub fn instantiate(&self, symbol: &str) -> Result<Arc<dyn Controller>, AppError> {
        let factory = self.factories.get(symbol).ok_or_else(|| {
            AppError::configuration(
                format!("Controller {symbol} does not exist"),
                json!({ "controller": symbol }),
            )
        })?;

        factory()
    }

    /// Resolves and constructs the controller for `page`.
    pub fn resolve(&self, page: &Page) -> Result<ResolvedController, AppError> {
        let symbol = self.symbol_for(page);
        let controller = self.instantiate(&symbol)?;
        Ok(ResolvedController { symbol, controller })
    }

    /// Resolves the controller for `page` and enumerates its route definitions.
    ///
    /// # Errors
    ///
    /// Construction failures and missing route capability are returned to
    /// the caller unchanged.
    pub fn route_definitions(
        &self,
        page: &Page,
    ) -> Result<(String, Vec<RouteDefinition>), AppError> {
        let resolved = self.resolve(page)?;
        let definitions = resolved.controller.routes()?;
        Ok((resolved.symbol, definitions))
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
