//! Structure (entry type) configuration fetched from the content API.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PREVIEW_CONTROLLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^@\s]+)@([^@\s]+)\s*$").expect("static regex is valid")
});

/// Configuration of a content structure.
///
/// Only `previewController` is interpreted; everything else the API returns
/// is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "previewController",
        alias = "preview_controller"
    )]
    pub preview_controller: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed `Controller@action` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAction {
    pub controller: String,
    pub action: String,
}

impl StructureConfig {
    /// Parses `previewController` into its controller and action.
    ///
    /// Returns `None` unless the value is exactly one non-empty controller
    /// segment and one non-empty action separated by a single `@`.
    pub fn preview_controller_action(&self) -> Option<ControllerAction> {
        let raw = self.preview_controller.as_deref()?;
        let caps = PREVIEW_CONTROLLER.captures(raw)?;

        Some(ControllerAction {
            controller: caps[1].to_string(),
            action: caps[2].to_string(),
        })
    }
}
