//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Structure cache backend unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "route_table": { "status": "ok", "message": "12 routes, 0 pages skipped" },
///     "cache": { "status": "ok", "message": "memory backend" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let route_check = check_route_table(&state);
    let cache_check = check_cache(&state).await;

    let all_healthy = route_check.status == "ok" && cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            route_table: route_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Reports the size of the mounted route table.
///
/// Skipped pages are reported but do not degrade health.
fn check_route_table(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!(
            "{} routes, {} pages skipped",
            state.route_table.len(),
            state.route_table.skipped.len()
        )),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let cache = state.structure_service.cache();

    if cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("{} backend", cache.backend())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{} backend unreachable", cache.backend())),
        }
    }
}
