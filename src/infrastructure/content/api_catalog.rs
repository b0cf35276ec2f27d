//! Content catalog backed by the content API.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use serde_with::{BoolFromInt, PickFirst, serde_as};

use crate::domain::entities::{Page, PageRevision, Redirect, Template};
use crate::domain::repositories::{ContentApi, ContentCatalog};
use crate::error::AppError;

/// Page as returned by `builder/pages`; the template is a bare id.
#[serde_as]
#[derive(Debug, Deserialize)]
struct PageRecord {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "type", default)]
    page_type: String,
    #[serde_as(as = "PickFirst<(_, BoolFromInt)>")]
    #[serde(default)]
    published: bool,
    #[serde(default)]
    template: Option<i64>,
    #[serde(default)]
    revision: Option<i64>,
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct RevisionRecord {
    #[serde(alias = "revision_id")]
    id: i64,
    #[serde(default)]
    content: Value,
}

/// [`ContentCatalog`] reading pages, templates and redirects over [`ContentApi`].
///
/// Pages are joined with `foundation/templates` so each [`Page`] carries its
/// template's controller name.
pub struct ApiContentCatalog {
    api: Arc<dyn ContentApi>,
}

impl ApiContentCatalog {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    async fn templates(&self) -> Result<HashMap<i64, Template>, AppError> {
        let templates: Vec<Template> = self.list("foundation/templates").await?;
        Ok(templates.into_iter().map(|t| (t.id, t)).collect())
    }

    /// Fetches a JSON array; a missing resource is an empty list.
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        match self.api.get(path).await? {
            Value::Null => Ok(Vec::new()),
            value => decode(path, value),
        }
    }

    fn into_page(record: PageRecord, templates: &HashMap<i64, Template>) -> Page {
        Page {
            id: record.id,
            name: record.name,
            url: record.url,
            page_type: record.page_type,
            published: record.published,
            template: record.template.and_then(|id| templates.get(&id).cloned()),
            revision: record.revision,
            content: record.content,
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::upstream(
            "Malformed content API response",
            json!({ "path": path, "reason": e.to_string() }),
        )
    })
}

#[async_trait]
impl ContentCatalog for ApiContentCatalog {
    async fn all_pages(&self) -> Result<Vec<Page>, AppError> {
        let templates = self.templates().await?;
        let records: Vec<PageRecord> = self.list("builder/pages").await?;

        Ok(records
            .into_iter()
            .map(|record| Self::into_page(record, &templates))
            .collect())
    }

    async fn find_page(&self, id: i64) -> Result<Option<Page>, AppError> {
        let path = format!("builder/pages/{id}");
        let record: PageRecord = match self.api.get(&path).await? {
            Value::Null => return Ok(None),
            value => decode(&path, value)?,
        };

        let templates = self.templates().await?;
        Ok(Some(Self::into_page(record, &templates)))
    }

    async fn find_revision(
        &self,
        page_id: i64,
        revision_id: i64,
    ) -> Result<Option<PageRevision>, AppError> {
        let path = format!("builder/pages/{page_id}/revisions/{revision_id}");
        let record: RevisionRecord = match self.api.get(&path).await? {
            Value::Null => return Ok(None),
            value => decode(&path, value)?,
        };

        Ok(Some(PageRevision {
            id: record.id,
            page_id,
            content: record.content,
        }))
    }

    async fn all_redirects(&self) -> Result<Vec<Redirect>, AppError> {
        self.list("foundation/redirects").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockContentApi;

    fn api_with(routes: Vec<(&'static str, Value)>) -> Arc<dyn ContentApi> {
        let mut mock = MockContentApi::new();
        mock.expect_get().returning(move |path| {
            Ok(routes
                .iter()
                .find(|(p, _)| *p == path)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null))
        });
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_all_pages_joins_templates() {
        let api = api_with(vec![
            (
                "foundation/templates",
                json!([{"id": 1, "name": "Blog", "controller": "BlogController"}]),
            ),
            (
                "builder/pages",
                json!([
                    {"id": 10, "url": "blog", "type": "page", "published": 1, "template": 1},
                    {"id": 11, "url": "about", "type": "page", "published": false, "template": 2}
                ]),
            ),
        ]);

        let pages = ApiContentCatalog::new(api).all_pages().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].published);
        assert_eq!(pages[0].controller(), Some("BlogController"));
        assert!(!pages[1].published);
        assert!(pages[1].template.is_none());
    }

    #[tokio::test]
    async fn test_find_page_missing() {
        let catalog = ApiContentCatalog::new(api_with(vec![]));
        assert!(catalog.find_page(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_revision() {
        let api = api_with(vec![(
            "builder/pages/7/revisions/3",
            json!({"revision_id": 3, "content": {"body": "draft"}}),
        )]);

        let revision = ApiContentCatalog::new(api)
            .find_revision(7, 3)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(revision.id, 3);
        assert_eq!(revision.page_id, 7);
        assert_eq!(revision.content["body"], "draft");
    }

    #[tokio::test]
    async fn test_malformed_response_is_upstream_error() {
        let api = api_with(vec![("foundation/redirects", json!({"not": "a list"}))]);

        let result = ApiContentCatalog::new(api).all_redirects().await;

        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }
}
