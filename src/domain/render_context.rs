//! Request-scoped rendering context.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::{DEFAULT_MODE, Page, PreviewPayload};

/// Mode, current page and editor tools of a single request.
///
/// A fresh value is created for every request and handed down the call
/// chain; it is never shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub mode: String,
    pub page: Option<Arc<Page>>,
    pub edit_tools: Option<Value>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::live()
    }
}

impl RenderContext {
    /// Context of a public, non-preview request.
    pub fn live() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            page: None,
            edit_tools: None,
        }
    }

    /// Context of a preview request, before a target has been resolved.
    pub fn from_payload(payload: &PreviewPayload) -> Self {
        Self {
            mode: payload.mode().to_string(),
            page: None,
            edit_tools: payload.edit_tools.clone().filter(|v| !v.is_null()),
        }
    }

    pub fn with_page(mut self, page: Arc<Page>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn is_live(&self) -> bool {
        self.mode == DEFAULT_MODE
    }

    pub fn has_edit_tools(&self) -> bool {
        self.edit_tools.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload() {
        let payload = PreviewPayload {
            relation: "entry".to_string(),
            mode: Some("preview".to_string()),
            edit_tools: Some(json!({"toolbar": true})),
            ..Default::default()
        };

        let ctx = RenderContext::from_payload(&payload);
        assert_eq!(ctx.mode, "preview");
        assert!(!ctx.is_live());
        assert!(ctx.has_edit_tools());
        assert!(ctx.page.is_none());
    }

    #[test]
    fn test_null_edit_tools_are_absent() {
        let payload = PreviewPayload {
            relation: "page".to_string(),
            edit_tools: Some(Value::Null),
            ..Default::default()
        };

        let ctx = RenderContext::from_payload(&payload);
        assert!(ctx.is_live());
        assert!(!ctx.has_edit_tools());
    }
}
