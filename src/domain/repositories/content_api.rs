//! Raw content API access.

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Client for the remote content API.
///
/// # Implementations
///
/// - [`crate::infrastructure::content::HttpContentApi`] - `reqwest` client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetches the resource at `path`, relative to the API base url.
    ///
    /// # Returns
    ///
    /// - `Ok(Value::Null)` if the resource does not exist
    /// - `Ok(value)` with the decoded JSON body otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on transport failures, non-success
    /// statuses other than 404, or undecodable bodies.
    async fn get(&self, path: &str) -> Result<Value, AppError>;
}
