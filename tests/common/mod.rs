#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::ConnectInfo,
    response::{IntoResponse, Response},
};
use page_router::application::services::{
    ControllerRegistry, PreviewService, PreviewTokenService, RouteTableBuilder, StructureService,
};
use page_router::domain::controller::{Controller, ControllerRequest, unknown_action};
use page_router::domain::entities::{
    Page, PageRevision, PreviewPayload, Redirect, RouteDefinition, StructureConfig, Template,
};
use page_router::domain::repositories::ContentApi;
use page_router::error::AppError;
use page_router::infrastructure::cache::MemoryCache;
use page_router::infrastructure::content::InMemoryCatalog;
use page_router::routes::app_router;
use page_router::state::{AppState, SiteSettings};
use page_router::web::controllers::default_registry;
use serde_json::{Map, Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::Layer;

pub const SECRET: &str = "test-preview-secret";
pub const BASE_URL: &str = "https://www.example.com";
pub const NAMESPACE: &str = "app::controllers";

/// Echoes what it was called with so tests can assert on dispatch.
fn echo(controller: &str, action: &str, request: &ControllerRequest) -> Response {
    Json(json!({
        "controller": controller,
        "action": action,
        "page_id": request.page().map(|p| p.id),
        "revision": request.page().and_then(|p| p.revision),
        "content": request.page().map(|p| p.content.clone()),
        "args": request.args,
        "mode": request.context.mode,
        "edit_tools": request.context.edit_tools,
        "method": request.method.as_str(),
    }))
    .into_response()
}

pub struct BlogController;

#[async_trait]
impl Controller for BlogController {
    fn routes(&self) -> Result<Vec<RouteDefinition>, AppError> {
        Ok(vec![
            RouteDefinition::get("/", "index"),
            RouteDefinition::get("/{slug}", "show"),
            RouteDefinition::post("/{slug}/comments", "comment"),
        ])
    }

    async fn call(&self, action: &str, request: ControllerRequest) -> Result<Response, AppError> {
        match action {
            "index" | "show" | "comment" => Ok(echo("BlogController", action, &request)),
            other => Err(unknown_action("BlogController", other)),
        }
    }
}

/// Declares no routes; pages using it are skipped outside strict mode.
pub struct LegacyController;

#[async_trait]
impl Controller for LegacyController {
    async fn call(&self, action: &str, _request: ControllerRequest) -> Result<Response, AppError> {
        Err(unknown_action("LegacyController", action))
    }
}

/// Entry previews only.
pub struct CatalogController;

#[async_trait]
impl Controller for CatalogController {
    fn routes(&self) -> Result<Vec<RouteDefinition>, AppError> {
        Ok(Vec::new())
    }

    async fn call(&self, action: &str, request: ControllerRequest) -> Result<Response, AppError> {
        match action {
            "preview" => Ok(echo("CatalogController", action, &request)),
            other => Err(unknown_action("CatalogController", other)),
        }
    }
}

pub fn test_registry() -> ControllerRegistry {
    let mut registry = default_registry(NAMESPACE);
    registry
        .register("BlogController", || BlogController)
        .register("LegacyController", || LegacyController)
        .register("CatalogController", || CatalogController);
    registry
}

pub fn page(id: i64, url: &str, controller: Option<&str>) -> Page {
    Page {
        id,
        name: format!("Page {id}"),
        url: url.to_string(),
        page_type: "page".to_string(),
        published: true,
        template: Some(Template {
            id: 100 + id,
            name: "default".to_string(),
            controller: controller.map(str::to_string),
        }),
        revision: Some(1),
        content: json!({ "body": "published" }),
    }
}

pub fn pages() -> Vec<Page> {
    let mut draft = page(4, "draft", None);
    draft.published = false;

    let mut folder = page(5, "folder", None);
    folder.page_type = "folder".to_string();

    vec![
        page(1, "", None),
        page(2, "blog", Some("BlogController")),
        page(3, "legacy", Some("LegacyController")),
        draft,
        folder,
        page(6, "about", None),
        page(7, "promo", None),
    ]
}

pub fn revisions() -> Vec<PageRevision> {
    vec![PageRevision {
        id: 50,
        page_id: 6,
        content: json!({ "body": "draft" }),
    }]
}

pub fn redirects() -> Vec<Redirect> {
    vec![
        Redirect {
            id: 1,
            source_url: "/old-blog/".to_string(),
            target_url: "/blog".to_string(),
            kind: 301,
        },
        Redirect {
            id: 2,
            source_url: "promo".to_string(),
            target_url: "/elsewhere".to_string(),
            kind: 302,
        },
        Redirect {
            id: 3,
            source_url: "/bad/{x}".to_string(),
            target_url: "/".to_string(),
            kind: 302,
        },
    ]
}

pub fn structure(id: i64, preview_controller: Option<&str>) -> StructureConfig {
    StructureConfig {
        id,
        name: Some(format!("Structure {id}")),
        preview_controller: preview_controller.map(str::to_string),
        extra: Map::new(),
    }
}

pub fn structures() -> Vec<StructureConfig> {
    vec![
        structure(10, Some("CatalogController@preview")),
        structure(11, Some("MissingController@preview")),
        structure(12, Some("CatalogController")),
    ]
}

/// Content API double counting the requests it serves.
pub struct CountingApi {
    inner: Arc<InMemoryCatalog>,
    pub calls: Arc<AtomicUsize>,
}

impl CountingApi {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentApi for CountingApi {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(path).await
    }
}

pub struct TestApp {
    pub state: AppState,
    pub api_calls: Arc<AtomicUsize>,
}

/// Wires the application over the fixture catalog with a lenient route
/// table, so the legacy page is skipped instead of failing the build.
pub fn create_test_app() -> TestApp {
    let catalog = Arc::new(
        InMemoryCatalog::new(pages())
            .with_revisions(revisions())
            .with_redirects(redirects())
            .with_structures(structures()),
    );
    let api_calls = Arc::new(AtomicUsize::new(0));
    let api = Arc::new(CountingApi {
        inner: catalog.clone(),
        calls: api_calls.clone(),
    });

    let registry = Arc::new(test_registry());
    let route_table = RouteTableBuilder::new(registry.clone(), false)
        .build(&pages())
        .unwrap();

    let structure_service = Arc::new(StructureService::new(api, Arc::new(MemoryCache::new())));
    let preview_service = Arc::new(PreviewService::new(
        catalog.clone(),
        structure_service.clone(),
        registry.clone(),
    ));

    let state = AppState {
        catalog,
        registry,
        structure_service,
        preview_service,
        preview_tokens: Arc::new(PreviewTokenService::new(SECRET)),
        route_table: Arc::new(route_table),
        site: SiteSettings {
            base_url: BASE_URL.to_string(),
            production: false,
        },
    };

    TestApp { state, api_calls }
}

pub fn create_test_router(state: AppState) -> Router {
    app_router(state, &redirects(), false).layer(MockConnectInfoLayer)
}

/// Router as deployed behind a reverse proxy: no peer address, client IP
/// only in forwarding headers.
pub fn create_proxied_router(state: AppState) -> Router {
    app_router(state, &redirects(), true)
}

pub fn sign(payload: &PreviewPayload) -> String {
    PreviewTokenService::new(SECRET).sign(payload, None).unwrap()
}

pub fn page_payload(page_id: i64) -> PreviewPayload {
    PreviewPayload {
        relation: "page".to_string(),
        mode: Some("preview".to_string()),
        page_id: Some(page_id),
        ..Default::default()
    }
}

pub fn entry_payload(structure_id: i64, entry_id: i64) -> PreviewPayload {
    PreviewPayload {
        relation: "entry".to_string(),
        mode: Some("preview".to_string()),
        structure_id: Some(structure_id),
        entry_id: Some(entry_id),
        ..Default::default()
    }
}

/// Supplies the peer address the rate limiter keys on.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
