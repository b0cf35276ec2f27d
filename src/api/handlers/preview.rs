//! Handler for the editor preview endpoint.

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::application::services::PreviewResolution;
use crate::domain::controller::ControllerRequest;
use crate::domain::entities::PreviewPayload;
use crate::domain::render_context::RenderContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::views::page_response;

/// Renders unpublished or historical content for the editing tool.
///
/// # Endpoint
///
/// `ANY /.well-known/netflex`, behind [`crate::api::middleware::jwt_proxy`]
///
/// # Request Flow
///
/// 1. Take the verified [`PreviewPayload`] from request extensions
/// 2. Resolve it to a default page view or a controller action
/// 3. Render, attaching the request's [`RenderContext`] to the response
///
/// The context is attached to error responses too, so outer layers always
/// see the mode and editor tools the payload asked for.
///
/// # Errors
///
/// - **400**: Unsupported relation
/// - **404**: Missing target or misconfigured preview controller
/// - **502**: Content API failure
pub async fn preview_handler(
    State(state): State<AppState>,
    Extension(payload): Extension<PreviewPayload>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut context = RenderContext::live();

    let result = dispatch(&state, &payload, &mut context, method, uri, headers).await;

    let mut response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!(relation = %payload.relation, error = %e, "Preview failed");
            e.into_response()
        }
    };

    response.extensions_mut().insert(context);
    response
}

async fn dispatch(
    state: &AppState,
    payload: &PreviewPayload,
    context: &mut RenderContext,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match state.preview_service.resolve(payload, context).await? {
        PreviewResolution::DefaultPage(page) => Ok(page_response(&page, context)),
        PreviewResolution::Dispatch {
            controller,
            action,
            args,
            ..
        } => {
            let request = ControllerRequest {
                context: context.clone(),
                method,
                uri,
                headers,
                args,
            };
            controller.call(&action, request).await
        }
    }
}
