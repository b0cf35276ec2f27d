//! Askama views shared by controllers and the preview dispatcher.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::entities::Page;
use crate::domain::render_context::RenderContext;
use crate::error::AppError;

/// Default view of a page, used when its template names no controller.
///
/// Renders `templates/page.html`.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageView {
    pub page_id: i64,
    pub title: String,
    pub mode: String,
    pub live: bool,
    pub edit_tools: bool,
    pub revision: Option<i64>,
    pub content: String,
}

impl PageView {
    pub fn new(page: &Page, context: &RenderContext) -> Self {
        Self {
            page_id: page.id,
            title: page.title().to_string(),
            mode: context.mode.clone(),
            live: context.is_live(),
            edit_tools: context.has_edit_tools(),
            revision: page.revision,
            content: serde_json::to_string_pretty(&page.content).unwrap_or_default(),
        }
    }
}

/// Renders the default view of `page`.
pub fn page_response(page: &Page, context: &RenderContext) -> Response {
    PageView::new(page, context).into_response()
}

/// One `<url>` of the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapView {
    pub stylesheet: String,
    pub entries: Vec<SitemapEntry>,
}

#[derive(Template)]
#[template(path = "sitemap.xsl", escape = "none")]
pub struct SitemapStylesheetView;

/// Renders a template with an explicit content type.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if rendering fails.
pub fn render_with_content_type<T: Template>(
    template: &T,
    content_type: &'static str,
) -> Result<Response, AppError> {
    let body = template
        .render()
        .map_err(|e| AppError::internal("Template rendering failed", json!({ "reason": e.to_string() })))?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
