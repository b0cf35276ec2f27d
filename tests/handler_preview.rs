mod common;

use axum_test::TestServer;
use page_router::application::services::PreviewTokenService;
use page_router::domain::entities::PreviewPayload;
use serde_json::{Value, json};
use std::sync::atomic::Ordering;

const PREVIEW: &str = "/.well-known/netflex";

fn server() -> (TestServer, common::TestApp) {
    let app = common::create_test_app();
    let server = TestServer::new(common::create_test_router(app.state.clone())).unwrap();
    (server, app)
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn test_preview_without_token_is_unauthorized() {
    let (server, _app) = server();

    let response = server.get(PREVIEW).await;

    assert_eq!(response.status_code(), 401);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_preview_with_foreign_signature_is_unauthorized() {
    let (server, _app) = server();
    let token = PreviewTokenService::new("another-secret")
        .sign(&common::page_payload(6), None)
        .unwrap();

    let response = server
        .get(PREVIEW)
        .add_header("Authorization", bearer(&token))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_preview_with_expired_token_is_unauthorized() {
    let (server, _app) = server();
    let token = PreviewTokenService::new(common::SECRET)
        .sign(&common::page_payload(6), Some(chrono::Duration::minutes(-5)))
        .unwrap();

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_page_preview_renders_default_view() {
    let (server, _app) = server();
    let token = common::sign(&common::page_payload(6));

    let response = server
        .get(PREVIEW)
        .add_header("Authorization", bearer(&token))
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#"data-page-id="6""#));
    assert!(body.contains(r#"data-mode="preview""#));
    assert!(body.contains("noindex"));
}

#[tokio::test]
async fn test_page_preview_with_token_in_query() {
    let (server, _app) = server();
    let token = common::sign(&common::page_payload(6));

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"data-page-id="6""#));
}

#[tokio::test]
async fn test_page_preview_loads_pinned_revision() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        revision_id: Some(50),
        ..common::page_payload(6)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#"data-revision="50""#));
    assert!(body.contains("draft"));
}

#[tokio::test]
async fn test_page_preview_ignores_zero_revision() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        revision_id: Some(0),
        ..common::page_payload(6)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"data-revision="1""#));
}

#[tokio::test]
async fn test_page_preview_with_unknown_revision() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        revision_id: Some(999),
        ..common::page_payload(6)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_page_preview_with_unknown_page() {
    let (server, _app) = server();
    let token = common::sign(&common::page_payload(404));

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_page_preview_dispatches_to_controller_index() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        edit_tools: Some(json!({ "toolbar": true })),
        ..common::page_payload(2)
    });

    let response = server
        .post(PREVIEW)
        .add_header("Authorization", bearer(&token))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["controller"], "BlogController");
    assert_eq!(json["action"], "index");
    assert_eq!(json["page_id"], 2);
    assert_eq!(json["args"], json!([]));
    assert_eq!(json["mode"], "preview");
    assert_eq!(json["edit_tools"]["toolbar"], true);
    assert_eq!(json["method"], "POST");
}

#[tokio::test]
async fn test_page_preview_of_unroutable_page() {
    let (server, _app) = server();
    let token = common::sign(&common::page_payload(4));

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"data-page-id="4""#));
}

#[tokio::test]
async fn test_entry_preview_dispatches_to_preview_controller() {
    let (server, app) = server();
    let token = common::sign(&PreviewPayload {
        revision_id: Some(3),
        ..common::entry_payload(10, 77)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["controller"], "CatalogController");
    assert_eq!(json["action"], "preview");
    assert_eq!(json["args"], json!(["10", "77", "3"]));
    assert_eq!(json["page_id"], Value::Null);
    assert_eq!(app.api_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_entry_preview_passes_absent_ids_as_null() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        entry_id: None,
        ..common::entry_payload(10, 0)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["args"], json!(["10", null, null]));
}

#[tokio::test]
async fn test_entry_preview_fetches_structure_once() {
    let (server, app) = server();

    for entry_id in [1, 2, 3] {
        let token = common::sign(&common::entry_payload(10, entry_id));
        server
            .get(&format!("{PREVIEW}?token={token}"))
            .await
            .assert_status_ok();
    }

    assert_eq!(app.api_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_entry_preview_without_structure_id() {
    let (server, app) = server();
    let token = common::sign(&PreviewPayload {
        structure_id: None,
        ..common::entry_payload(10, 77)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(app.api_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_entry_preview_with_unknown_structure_is_not_cached() {
    let (server, app) = server();
    let token = common::sign(&common::entry_payload(99, 1));

    for _ in 0..2 {
        let response = server.get(&format!("{PREVIEW}?token={token}")).await;
        assert_eq!(response.status_code(), 404);
    }

    assert_eq!(app.api_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_entry_preview_with_unregistered_controller() {
    let (server, _app) = server();
    let token = common::sign(&common::entry_payload(11, 1));

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 404);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "configuration_error");
    assert_eq!(
        json["error"]["details"]["controller"],
        "app::controllers::MissingController"
    );
}

#[tokio::test]
async fn test_entry_preview_with_malformed_preview_controller() {
    let (server, _app) = server();
    let token = common::sign(&common::entry_payload(12, 1));

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "configuration_error"
    );
}

#[tokio::test]
async fn test_unsupported_relation() {
    let (server, _app) = server();
    let token = common::sign(&PreviewPayload {
        relation: "folder".to_string(),
        ..common::page_payload(6)
    });

    let response = server.get(&format!("{PREVIEW}?token={token}")).await;

    assert_eq!(response.status_code(), 400);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "unsupported_relation");
    assert_eq!(json["error"]["details"]["relation"], "folder");
}

#[tokio::test]
async fn test_preview_behind_proxy_keys_on_forwarded_ip() {
    let app = common::create_test_app();
    let server = TestServer::new(common::create_proxied_router(app.state)).unwrap();
    let token = common::sign(&common::page_payload(6));

    let response = server
        .get(&format!("{PREVIEW}?token={token}"))
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"data-page-id="6""#));
}
