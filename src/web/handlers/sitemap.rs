//! Handlers for the XML sitemap and its stylesheet.

use axum::{extract::State, response::Response};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::route_path::absolute_url;
use crate::web::views::{
    SitemapEntry, SitemapStylesheetView, SitemapView, render_with_content_type,
};

/// Lists every page that registered routes, as absolute urls.
///
/// # Endpoint
///
/// `GET /sitemap.xml`
pub async fn sitemap_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let base_url = &state.site.base_url;

    let entries = state
        .route_table
        .pages()
        .iter()
        .map(|page| SitemapEntry {
            loc: absolute_url(base_url, &page.url),
        })
        .collect();

    let view = SitemapView {
        stylesheet: absolute_url(base_url, "sitemap.xsl"),
        entries,
    };

    render_with_content_type(&view, "application/xml")
}

/// `GET /sitemap.xsl`
pub async fn sitemap_stylesheet_handler() -> Result<Response, AppError> {
    render_with_content_type(&SitemapStylesheetView, "text/xsl")
}
