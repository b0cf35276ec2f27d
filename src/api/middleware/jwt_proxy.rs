//! Trusted proxy authentication for the editor preview endpoint.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::Uri,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Verifies the preview token and exposes its payload to the handler.
///
/// # Token Sources
///
/// ```text
/// Authorization: Bearer <token>
/// GET /.well-known/netflex?token=<token>
/// ```
///
/// The header wins when both are present. On success the decoded
/// [`crate::domain::entities::PreviewPayload`] is inserted into the request
/// extensions.
///
/// # Errors
///
/// Returns `401 Unauthorized` if no token is supplied or verification fails.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => token,
        Err(_) => query_token(&parts.uri).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Preview token is missing"}),
            )
        })?,
    };

    let payload = st.preview_tokens.verify(&token)?;
    parts.extensions.insert(payload);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn query_token(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}
