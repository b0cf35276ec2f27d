//! HTTP client for the content API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;
use url::Url;

use crate::domain::repositories::ContentApi;
use crate::error::{AppError, map_reqwest_error};

/// Transport retries after the first attempt. Status errors are not retried.
const MAX_RETRIES: usize = 2;

/// `reqwest`-backed [`ContentApi`].
///
/// Sends `Authorization: Bearer <token>` when a token is configured.
pub struct HttpContentApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpContentApi {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the base url is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        let base_url = Url::parse(&base).map_err(|e| {
            AppError::internal(
                "Invalid content API url",
                json!({ "url": base_url, "reason": e.to_string() }),
            )
        })?;

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::internal(
                "Failed to build content API client",
                json!({ "reason": e.to_string() }),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Resolves a relative resource path against the base url.
    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                AppError::internal(
                    "Invalid content API path",
                    json!({ "path": path, "reason": e.to_string() }),
                )
            })
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let url = self.endpoint(path)?;
        let strategy = ExponentialBackoff::from_millis(50)
            .map(jitter)
            .take(MAX_RETRIES);

        let response = Retry::spawn(strategy, || self.send(&url))
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        debug!("Content API GET {} -> {}", path, status);

        if status == StatusCode::NOT_FOUND {
            return Ok(Value::Null);
        }

        if !status.is_success() {
            return Err(AppError::upstream(
                "Content API returned an error status",
                json!({ "path": path, "status": status.as_u16() }),
            ));
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}
