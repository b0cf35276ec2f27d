//! Controller capability resolved by name from template configuration.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use serde_json::json;

use crate::domain::entities::{Page, RouteDefinition};
use crate::domain::render_context::RenderContext;
use crate::error::AppError;

/// Everything an action receives about the request it handles.
#[derive(Debug, Clone)]
pub struct ControllerRequest {
    pub context: RenderContext,
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    /// Positional arguments: route parameters in path order, or
    /// `(structure_id, entry_id, revision_id)` for entry previews.
    pub args: Vec<Option<String>>,
}

impl ControllerRequest {
    pub fn new(context: RenderContext) -> Self {
        Self {
            context,
            method: Method::GET,
            uri: Uri::from_static("/"),
            headers: HeaderMap::new(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<Option<String>>) -> Self {
        self.args = args;
        self
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(|a| a.as_deref())
    }

    /// Page the request is about, if one was bound.
    pub fn page(&self) -> Option<&Arc<Page>> {
        self.context.page.as_ref()
    }
}

/// A handler resolved from a template's `controller` name or a structure's
/// `previewController`.
///
/// Controllers are constructed fresh for every resolution; implementations
/// must not rely on state surviving between calls.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Sub-routes to register under every page using this controller.
    ///
    /// The default implementation reports that the controller has no route
    /// capability, which the route table treats as a configuration error.
    fn routes(&self) -> Result<Vec<RouteDefinition>, AppError> {
        Err(AppError::configuration(
            "Controller does not declare routes",
            json!({}),
        ))
    }

    /// Runs the named action.
    ///
    /// # Errors
    ///
    /// Implementations return [`unknown_action`] for actions they do not have.
    async fn call(&self, action: &str, request: ControllerRequest) -> Result<Response, AppError>;
}

/// Error for an action name a controller does not implement.
pub fn unknown_action(controller: &str, action: &str) -> AppError {
    AppError::configuration(
        format!("Action {action} is not defined on {controller}"),
        json!({ "controller": controller, "action": action }),
    )
}
