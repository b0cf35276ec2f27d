//! Redirect entity.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// A catalog-managed redirect from one site path to another url.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redirect {
    pub id: i64,
    pub source_url: String,
    pub target_url: String,
    /// HTTP status code as authored, e.g. `301`.
    #[serde(rename = "type", default = "default_redirect_type")]
    pub kind: u16,
}

fn default_redirect_type() -> u16 {
    302
}

impl Redirect {
    /// Status to answer with. Anything that is not a redirect status becomes `302`.
    pub fn status(&self) -> StatusCode {
        match self.kind {
            301 | 302 | 303 | 307 | 308 => {
                StatusCode::from_u16(self.kind).unwrap_or(StatusCode::FOUND)
            }
            _ => StatusCode::FOUND,
        }
    }

    /// Source path without surrounding slashes.
    pub fn source_path(&self) -> &str {
        self.source_url.trim_matches('/')
    }
}
