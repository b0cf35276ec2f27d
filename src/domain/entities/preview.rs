//! Editor preview payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// Rendering mode used when the payload does not name one.
pub const DEFAULT_MODE: &str = "live";

/// What kind of content a preview targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Page,
    Entry,
    /// Any other value; rejected by the preview resolver.
    Other(String),
}

/// Authenticated request from the editing tool.
///
/// Ids are accepted as JSON numbers or numeric strings. Which id group is
/// meaningful is selected by `relation`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    pub relation: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub edit_tools: Option<Value>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub page_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub revision_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub structure_id: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub entry_id: Option<i64>,
}

impl PreviewPayload {
    pub fn relation(&self) -> Relation {
        match self.relation.as_str() {
            "page" => Relation::Page,
            "entry" => Relation::Entry,
            other => Relation::Other(other.to_string()),
        }
    }

    /// Rendering mode, `"live"` when absent or blank.
    pub fn mode(&self) -> &str {
        self.mode
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MODE)
    }

    /// Revision to pin, ignoring absent and zero ids.
    pub fn pinned_revision(&self) -> Option<i64> {
        self.revision_id.filter(|id| *id != 0)
    }
}
