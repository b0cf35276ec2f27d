//! Handler for `robots.txt`.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

/// Robots exclusion file: crawlers are allowed only in production.
///
/// # Endpoint
///
/// `GET /robots.txt`
pub async fn robots_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        robots_txt(state.site.production),
    )
}

pub fn robots_txt(production: bool) -> String {
    let permission = if production { "Allow" } else { "Disallow" };
    format!("User-Agent: *\n{permission}: /")
}
