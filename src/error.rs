use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-wide error type.
///
/// Every variant carries a human-readable message and structured JSON
/// details. Variants map to HTTP status codes in [`IntoResponse`]; the route
/// table builder instead inspects them to apply its failure policy.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// Unresolvable controller symbol, missing route capability or a
    /// malformed `previewController`.
    #[error("{message}")]
    Configuration { message: String, details: Value },
    #[error("{message}")]
    UnsupportedRelation { message: String, details: Value },
    /// Content API failure. Never cached.
    #[error("{message}")]
    Upstream { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }
    pub fn unsupported_relation(message: impl Into<String>, details: Value) -> Self {
        Self::UnsupportedRelation {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Structured details attached to the error.
    pub fn details(&self) -> &Value {
        match self {
            Self::Unauthorized { details, .. }
            | Self::NotFound { details, .. }
            | Self::Configuration { details, .. }
            | Self::UnsupportedRelation { details, .. }
            | Self::Upstream { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Configuration { message, details } => (
                StatusCode::NOT_FOUND,
                "configuration_error",
                message,
                details,
            ),
            AppError::UnsupportedRelation { message, details } => (
                StatusCode::BAD_REQUEST,
                "unsupported_relation",
                message,
                details,
            ),
            AppError::Upstream { message, details } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub fn map_reqwest_error(e: reqwest::Error) -> AppError {
    let status = e.status().map(|s| s.as_u16());
    AppError::upstream(
        "Content API request failed",
        serde_json::json!({ "reason": e.to_string(), "status": status }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::unauthorized("x", json!({})), StatusCode::UNAUTHORIZED),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::configuration("x", json!({})), StatusCode::NOT_FOUND),
            (
                AppError::unsupported_relation("x", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::upstream("x", json!({})), StatusCode::BAD_GATEWAY),
            (
                AppError::internal("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_display_uses_message() {
        let error = AppError::configuration("Controller missing", json!({"symbol": "x"}));
        assert_eq!(error.to_string(), "Controller missing");
        assert_eq!(error.details()["symbol"], "x");
    }
}
