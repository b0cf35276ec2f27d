//! Catalog-managed redirects.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::entities::Redirect;

/// Fixed response of one redirect, built once at startup.
#[derive(Debug, Clone)]
pub struct RedirectTarget {
    pub status: StatusCode,
    pub location: String,
}

impl From<&Redirect> for RedirectTarget {
    fn from(redirect: &Redirect) -> Self {
        Self {
            status: redirect.status(),
            location: redirect.target_url.clone(),
        }
    }
}

/// Answers with the redirect's status and `Location` header.
pub async fn redirect_handler(target: RedirectTarget) -> Response {
    (target.status, [(header::LOCATION, target.location)]).into_response()
}
