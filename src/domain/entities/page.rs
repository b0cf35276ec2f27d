//! Page and template entities owned by the content catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator value of pages that receive dynamic routes.
pub const ROUTABLE_PAGE_TYPE: &str = "page";

/// Template bound to a page, optionally naming the controller that renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub controller: Option<String>,
}

/// An addressable site page from the content catalog.
///
/// `url` is the page's path segment as authored; callers must not assume
/// leading or trailing slashes have been normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub page_type: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub template: Option<Template>,
    /// Revision whose content this instance currently exposes.
    #[serde(default)]
    pub revision: Option<i64>,
    #[serde(default)]
    pub content: Value,
}

/// A stored revision of a page's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRevision {
    pub id: i64,
    pub page_id: i64,
    #[serde(default)]
    pub content: Value,
}

impl Page {
    /// Returns true if the page takes part in the dynamic route table:
    /// `type == "page"`, a template is set and the page is published.
    pub fn is_routable(&self) -> bool {
        self.page_type == ROUTABLE_PAGE_TYPE && self.template.is_some() && self.published
    }

    /// Controller name configured on the page's template, if any.
    ///
    /// Blank names count as unset.
    pub fn controller(&self) -> Option<&str> {
        self.template
            .as_ref()
            .and_then(|t| t.controller.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Swaps the exposed content for the given revision.
    ///
    /// Identity, url and template are left untouched.
    pub fn load_revision(&mut self, revision: PageRevision) -> &mut Self {
        self.revision = Some(revision.id);
        self.content = revision.content;
        self
    }

    /// Page title, falling back to the url when the page has no name.
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(controller: Option<&str>) -> Page {
        Page {
            id: 7,
            name: "About".to_string(),
            url: "about".to_string(),
            page_type: "page".to_string(),
            published: true,
            template: Some(Template {
                id: 1,
                name: "Default".to_string(),
                controller: controller.map(str::to_string),
            }),
            revision: Some(1),
            content: json!({"body": "live"}),
        }
    }

    #[test]
    fn test_is_routable() {
        let mut p = page(None);
        assert!(p.is_routable());

        p.published = false;
        assert!(!p.is_routable());

        p.published = true;
        p.page_type = "folder".to_string();
        assert!(!p.is_routable());

        p.page_type = "page".to_string();
        p.template = None;
        assert!(!p.is_routable());
    }

    #[test]
    fn test_controller_blank_is_none() {
        assert_eq!(page(Some("Blog")).controller(), Some("Blog"));
        assert_eq!(page(Some("  ")).controller(), None);
        assert_eq!(page(None).controller(), None);
    }

    #[test]
    fn test_load_revision_keeps_identity() {
        let mut p = page(Some("Blog"));
        p.load_revision(PageRevision {
            id: 3,
            page_id: 7,
            content: json!({"body": "draft"}),
        });

        assert_eq!(p.id, 7);
        assert_eq!(p.url, "about");
        assert_eq!(p.controller(), Some("Blog"));
        assert_eq!(p.revision, Some(3));
        assert_eq!(p.content["body"], "draft");
    }

    #[test]
    fn test_deserialize_type_field() {
        let p: Page = serde_json::from_value(json!({
            "id": 1,
            "url": "home",
            "type": "page",
            "published": true
        }))
        .unwrap();

        assert_eq!(p.page_type, "page");
        assert!(p.template.is_none());
        assert_eq!(p.title(), "home");
    }
}
