//! HTTP integration tests for the Second Brain REST API
//!
//! Uses the in-memory document collection, so no database is needed. Handlers
//! are exercised end-to-end through the Axum router with `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use brain_core::{BrainConfig, MemoryCollection, StoreBackend, ThoughtStore};
use brain_server::http::{build_router, HttpState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn make_http_state() -> Arc<HttpState> {
    let mut config = BrainConfig::default();
    config.store.backend = StoreBackend::Memory;
    config.listing.max_limit = 3;
    Arc::new(HttpState {
        store: ThoughtStore::new(Arc::new(MemoryCollection::new())),
        config,
    })
}

async fn send(state: &Arc<HttpState>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = build_router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_root_and_version() {
    let state = make_http_state();

    let (status, body) = send(&state, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));

    let (status, body) = send(&state, get("/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["protocol"], "brain/1");
}

#[tokio::test]
async fn test_folders_endpoint() {
    let state = make_http_state();
    let (status, body) = send(&state, get("/api/folders")).await;
    assert_eq!(status, StatusCode::OK);

    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["inbox", "reads", "notes", "ideas", "tasks"]);
    assert_eq!(body[4]["name"], "Tasks");
    assert_eq!(body[4]["priority"], 4);
}

#[tokio::test]
async fn test_ingest_then_list_round_trip() {
    let state = make_http_state();

    let payload = json!({
        "title": "Sprint",
        "content": "I need to finish this task by the deadline",
        "modality": "text",
        "tags": ["work"]
    });
    let (status, body) = send(&state, post_json("/api/ingest", &payload)).await;
    assert_eq!(status, StatusCode::OK, "{:?}", body);
    assert_eq!(body["ok"], true);
    assert_eq!(body["folder"], "tasks");
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, body) = send(&state, get("/api/thoughts?folder=tasks")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item["id"], id);
    assert_eq!(item["title"], "Sprint");
    assert_eq!(item["content"], "I need to finish this task by the deadline");
    assert_eq!(item["tags"], json!(["work"]));
    assert_eq!(item["folder"], "tasks");
    assert_eq!(item["status"], "active");
    assert_eq!(item["pinned"], false);
    assert_eq!(item["meta"]["routed_by"], "heuristic-v0");
    assert!(item["created_at"].is_string());
}

#[tokio::test]
async fn test_ingest_rejects_unsupported_modality() {
    let state = make_http_state();
    let payload = json!({"content": "todo", "modality": "telepathy"});
    let (status, body) = send(&state, post_json("/api/ingest", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (_, body) = send(&state, get("/api/thoughts")).await;
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_ingest_missing_modality_is_client_error() {
    let state = make_http_state();
    let (status, _) = send(&state, post_json("/api/ingest", &json!({"content": "hi"}))).await;
    assert!(status.is_client_error(), "got {}", status);
}

#[tokio::test]
async fn test_list_limit_and_cap() {
    let state = make_http_state();
    for i in 0..5 {
        let payload = json!({"content": format!("random capture {}", i), "modality": "text"});
        let (status, _) = send(&state, post_json("/api/ingest", &payload)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&state, get("/api/thoughts?limit=2")).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    // capped by listing.max_limit
    let (_, body) = send(&state, get("/api/thoughts?limit=100")).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (_, body) = send(&state, get("/api/thoughts?folder=inbox&limit=1")).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "random capture 0");
}

#[tokio::test]
async fn test_list_unknown_folder_is_empty() {
    let state = make_http_state();
    let (status, body) = send(&state, get("/api/thoughts?folder=nonexistent-key")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = make_http_state();
    send(&state, post_json("/api/ingest", &json!({"content": "x", "modality": "text"}))).await;

    let (status, body) = send(&state, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "running");
    assert_eq!(body["connection_status"], "connected");
    assert_eq!(body["collections"], json!(["thought"]));
}
