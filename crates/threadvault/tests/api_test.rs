//! HTTP API tests driving the router directly

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use threadvault::{AppState, create_router};
use threadvault_core::{Dataset, ServerConfig};
use tower::ServiceExt;

fn dataset() -> Dataset {
    Dataset::from_value(json!({
        "docA": {
            "displayName": "A",
            "accountId": "a1",
            "tweets": [
                {"id": "1", "text": "hi", "links": [{"url": "docA/2", "label": "see"}]},
                {"id": "2", "text": "bye"},
                {"id": "3", "links": [{"url": "docA/3"}, {"url": "gone/1"}]}
            ]
        }
    }))
    .expect("valid dataset")
}

struct TestApp {
    router: Router,
    dir: TempDir,
}

fn app() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let mut config = ServerConfig::builder()
        .store_path(dir.path().join("store.json"))
        .static_dir(dir.path().join("public"))
        .build()
        .expect("valid config");
    config.spa_index = dir.path().join("dist").join("index.html");

    std::fs::create_dir_all(dir.path().join("public")).expect("public dir");
    std::fs::write(dir.path().join("public").join("main.css"), "body{}").expect("css");
    std::fs::create_dir_all(dir.path().join("dist")).expect("dist dir");
    std::fs::write(config.spa_index.clone(), "<div id=\"app\"></div>").expect("spa index");

    let state = Arc::new(AppState::new(config, dataset()));
    TestApp {
        router: create_router(state),
        dir,
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().uri(uri).method(method);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn test_documents_endpoint_returns_dataset() {
    let app = app();
    let (status, body) = send_json(&app.router, "GET", "/api/documents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docA"]["displayName"], json!("A"));
    assert_eq!(body["docA"]["tweets"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_document_endpoint() {
    let app = app();
    let (status, body) = send_json(&app.router, "GET", "/api/document/docA", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accountId"], json!("a1"));

    let (status, body) = send_json(&app.router, "GET", "/api/document/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Document not found"}));
}

#[tokio::test]
async fn test_tweet_endpoint_resolves_links() {
    let app = app();
    let (status, body) = send_json(&app.router, "GET", "/api/document/docA/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": "1",
            "text": "hi",
            "document": {"displayName": "A", "accountId": "a1"},
            "links": [{
                "url": "docA/2",
                "label": "see",
                "content": {
                    "id": "2",
                    "text": "bye",
                    "document": {"displayName": "A", "accountId": "a1"}
                }
            }]
        })
    );

    let (_, body) = send_json(&app.router, "GET", "/api/document/docA/3", None).await;
    assert_eq!(body["links"][0]["content"], Value::Null);
    assert_eq!(body["links"][1]["url"], json!("gone/1"));
    assert_eq!(body["links"][1]["content"], Value::Null);
}

#[tokio::test]
async fn test_tweet_endpoint_not_found_messages() {
    let app = app();
    let (status, body) = send_json(&app.router, "GET", "/api/document/nope/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Document not found"}));

    let (status, body) = send_json(&app.router, "GET", "/api/document/docA/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Tweet not found"}));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app();
    let (status, body) = send_json(&app.router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_tweets"], json!(3));
    assert_eq!(body["broken_links"][0]["target"], json!("gone/1"));
    assert_eq!(body["self_links"], json!(["docA/3"]));
}

#[tokio::test]
async fn test_list_and_comment_flow() {
    let app = app();

    let (status, list) =
        send_json(&app.router, "POST", "/api/lists", Some(json!({"name": "Reading"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let list_id = list["id"].as_str().expect("list id").to_string();

    let (status, list) = send_json(
        &app.router,
        "POST",
        &format!("/api/lists/{}/items", list_id),
        Some(json!({"path": "docA/1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["items"], json!(["docA/1"]));

    let (status, body) = send_json(
        &app.router,
        "POST",
        &format!("/api/lists/{}/items", list_id),
        Some(json!({"path": "docA/404"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Tweet not found"}));

    let comments_uri = format!("/api/lists/{}/comments/docA/1", list_id);
    let (status, comment) = send_json(
        &app.router,
        "POST",
        &comments_uri,
        Some(json!({"content": "worth reading"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["content"], json!("worth reading"));

    let (_, comments) = send_json(&app.router, "GET", &comments_uri, None).await;
    assert_eq!(comments.as_array().map(Vec::len), Some(1));

    let (status, _) = send_json(&app.router, "PUT", &comments_uri, Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, comments) = send_json(&app.router, "GET", &comments_uri, None).await;
    assert_eq!(comments, json!([]));

    let (status, _) = send_json(
        &app.router,
        "DELETE",
        &format!("/api/lists/{}", list_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) =
        send_json(&app.router, "GET", &format!("/api/lists/{}", list_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "List not found"}));
}

#[tokio::test]
async fn test_save_comments_without_list_is_not_found() {
    let app = app();
    let (status, body) = send_json(
        &app.router,
        "PUT",
        "/api/lists/missing/comments/docA/1",
        Some(json!([])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "List not found"}));
    assert!(!app.dir.path().join("store.json").exists());
}

#[tokio::test]
async fn test_create_list_validation() {
    let app = app();
    let (status, body) =
        send_json(&app.router, "POST", "/api/lists", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_revision_flow_and_diff() {
    let app = app();

    let (status, body) = send_json(&app.router, "GET", "/api/revisions/docA", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Revision not found"}));

    let mut edited = send_json(&app.router, "GET", "/api/document/docA", None).await.1;
    edited["tweets"][1]["text"] = json!("goodbye");

    let (status, revision) = send_json(
        &app.router,
        "PUT",
        "/api/revisions/docA",
        Some(json!({"document": edited})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(revision["documentId"], json!("docA"));
    assert_eq!(revision["baseHash"].as_str().map(str::len), Some(64));

    let (status, diff) = send_json(&app.router, "GET", "/api/revisions/docA/diff", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(diff["stale"], json!(false));
    assert_eq!(diff["differences"][0]["path"], json!("tweets.1.text"));
    assert!(
        diff["differences"][0]["localHtml"]
            .as_str()
            .is_some_and(|html| html.contains("diff-added"))
    );

    let (status, _) = send_json(&app.router, "DELETE", "/api/revisions/docA", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send_json(&app.router, "DELETE", "/api/revisions/docA", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revision_for_unknown_document() {
    let app = app();
    let (status, body) = send_json(
        &app.router,
        "PUT",
        "/api/revisions/nope",
        Some(json!({"document": {"tweets": []}})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Document not found"}));
}

#[tokio::test]
async fn test_text_diff_endpoint() {
    let app = app();
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/diff/text",
        Some(json!({"before": "a<b", "after": "a<c"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["html"],
        json!(r#"a&lt;<span class="diff-removed">b</span><span class="diff-added">c</span>"#)
    );
}

#[tokio::test]
async fn test_value_diff_endpoint() {
    let app = app();
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/diff/values",
        Some(json!({
            "bundled": {"title": "cat", "count": 1},
            "local": {"title": "cut", "count": 1, "pinned": true}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let differences = body.as_array().expect("array of differences");
    assert_eq!(differences.len(), 2);

    assert_eq!(differences[0]["path"], json!("title"));
    assert_eq!(differences[0]["bundled"], json!("cat"));
    assert_eq!(differences[0]["local"], json!("cut"));
    assert_eq!(
        differences[0]["bundledHtml"],
        json!(r#"&quot;c<span class="diff-removed">a</span>t&quot;"#)
    );
    assert_eq!(
        differences[0]["localHtml"],
        json!(r#"&quot;c<span class="diff-added">u</span>t&quot;"#)
    );

    assert_eq!(differences[1]["path"], json!("pinned"));
    assert!(differences[1].get("bundled").is_none());
    assert_eq!(
        differences[1]["bundledHtml"],
        json!(r#"<span class="diff-removed">null</span>"#)
    );
    assert_eq!(
        differences[1]["localHtml"],
        json!(r#"<span class="diff-added">true</span>"#)
    );
}

async fn send_raw(router: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&bytes).expect("json error body"))
}

#[tokio::test]
async fn test_malformed_json_bodies_get_json_errors() {
    let app = app();

    for (method, uri) in [
        ("POST", "/api/lists"),
        ("PUT", "/api/revisions/docA"),
        ("POST", "/api/diff/text"),
        ("POST", "/api/diff/values"),
    ] {
        let (status, body) = send_raw(&app.router, method, uri, "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert!(body["error"].is_string(), "{method} {uri}: {body}");
    }

    // well-formed JSON of the wrong shape
    let (status, body) = send_raw(&app.router, "POST", "/api/lists", r#"{"title": 1}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_tweet_endpoint_keeps_numeric_ids_and_field_order() {
    let dir = TempDir::new().expect("temp dir");
    let config = ServerConfig::builder()
        .store_path(dir.path().join("store.json"))
        .static_dir(dir.path().join("public"))
        .build()
        .expect("valid config");
    let data = Dataset::from_value(json!({
        "d": {"tweets": [
            {"text": "first", "id": 7, "links": [{"url": "d/8"}]},
            {"id": 8}
        ]}
    }))
    .expect("valid dataset");
    let router = create_router(Arc::new(AppState::new(config, data)));

    let (status, bytes) = send(&router, "GET", "/api/document/d/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).expect("utf-8"),
        r#"{"text":"first","id":7,"links":[{"url":"d/8","content":{"id":8,"document":{}}}],"document":{}}"#
    );
}

#[tokio::test]
async fn test_static_files_and_spa_fallback() {
    let app = app();
    let (status, body) = send(&app.router, "GET", "/main.css", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body{}");

    let (status, body) = send(&app.router, "GET", "/document/docA/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8_lossy(&body), "<div id=\"app\"></div>");
}

#[tokio::test]
async fn test_cors_headers() {
    let app = app();
    let request = Request::builder()
        .uri("/api/documents")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .expect("request");
    let response = app.router.clone().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
