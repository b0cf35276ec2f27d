//! Built-in controller for pages whose template names no controller.

use async_trait::async_trait;
use axum::response::Response;
use serde_json::json;

use crate::domain::controller::{Controller, ControllerRequest, unknown_action};
use crate::domain::entities::RouteDefinition;
use crate::error::AppError;
use crate::web::views::page_response;

/// Serves a page at its own url with the default view.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageController;

#[async_trait]
impl Controller for PageController {
    fn routes(&self) -> Result<Vec<RouteDefinition>, AppError> {
        Ok(vec![RouteDefinition::get("/", "index")])
    }

    async fn call(&self, action: &str, request: ControllerRequest) -> Result<Response, AppError> {
        match action {
            "index" => {
                let page = request
                    .page()
                    .ok_or_else(|| AppError::not_found("No page bound to request", json!({})))?;
                Ok(page_response(page, &request.context))
            }
            other => Err(unknown_action("PageController", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Page;
    use crate::domain::render_context::RenderContext;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[test]
    fn test_declares_index_at_page_root() {
        let routes = PageController.routes().unwrap();
        assert_eq!(routes, vec![RouteDefinition::get("/", "index")]);
    }

    #[tokio::test]
    async fn test_index_renders_bound_page() {
        let page = Page {
            id: 1,
            name: "Home".to_string(),
            url: String::new(),
            page_type: "page".to_string(),
            published: true,
            template: None,
            revision: None,
            content: json!({}),
        };
        let request = ControllerRequest::new(RenderContext::live().with_page(Arc::new(page)));

        let response = PageController.call("index", request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_without_page_is_not_found() {
        let request = ControllerRequest::new(RenderContext::live());
        let result = PageController.call("index", request).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let request = ControllerRequest::new(RenderContext::live());
        let result = PageController.call("show", request).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
