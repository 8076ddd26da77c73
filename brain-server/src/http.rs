//! Second Brain HTTP REST API
//!
//! Axum-based HTTP server exposing capture and listing over HTTP. Runs
//! alongside the Unix socket IPC server.
//!
//! Each endpoint has a thin axum handler that delegates to an inner function;
//! the inner functions are directly testable without axum dispatch.
//!
//! Endpoints:
//! - GET  /              liveness message
//! - GET  /health        store diagnostics (never fails)
//! - GET  /version       server version info
//! - GET  /api/folders   fixed folder registry
//! - POST /api/ingest    validate, route and persist a capture
//! - GET  /api/thoughts  list thoughts (`?folder=&limit=`)

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use brain_core::{BrainConfig, BrainError, ThoughtStore};
use brain_ingest::IngestRequest;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::router;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub store: ThoughtStore,
    pub config: BrainConfig,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/api/folders", get(folders_handler))
        .route("/api/ingest", post(ingest_handler))
        .route("/api/thoughts", get(list_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    store: ThoughtStore,
    config: BrainConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { store, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Second Brain HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub folder: Option<String>,
    pub limit: Option<usize>,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

/// Status code for a core error: caller mistakes are 400, everything else 500.
pub fn error_status(err: &BrainError) -> StatusCode {
    match err {
        BrainError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(err: BrainError) -> (StatusCode, serde_json::Value) {
    let status = error_status(&err);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    }
    let body = serde_json::to_value(ErrorResponse::new(err.to_string()))
        .unwrap_or_else(|_| serde_json::json!({"status": "error"}));
    (status, body)
}

// ============================================================================
// Inner (directly testable) functions
// ============================================================================

pub fn root_inner() -> serde_json::Value {
    serde_json::json!({"message": "Second Brain backend is running"})
}

/// Inner health check. Store problems are described in the body, so this always returns 200.
pub async fn health_inner(store: &ThoughtStore) -> (StatusCode, serde_json::Value) {
    let mut body = router::health_report(store).await;
    if let Some(obj) = body.as_object_mut() {
        obj.insert("version".to_string(), serde_json::json!(env!("CARGO_PKG_VERSION")));
    }
    (StatusCode::OK, body)
}

/// Inner version — returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "brain/1",
    })
}

pub fn folders_inner() -> serde_json::Value {
    router::folders_value()
}

pub async fn ingest_inner(
    store: &ThoughtStore,
    req: IngestRequest,
) -> (StatusCode, serde_json::Value) {
    match router::ingest_value(store, req).await {
        Ok(data) => (StatusCode::OK, data),
        Err(e) => error_body(e),
    }
}

pub async fn list_inner(
    store: &ThoughtStore,
    config: &BrainConfig,
    query: ListQuery,
) -> (StatusCode, serde_json::Value) {
    match router::list_value(store, config, query.folder, query.limit).await {
        Ok(data) => (StatusCode::OK, data),
        Err(e) => error_body(e),
    }
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(root_inner()))
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.store).await;
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn folders_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(folders_inner()))
}

pub async fn ingest_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<IngestRequest>,
) -> impl IntoResponse {
    let (status, body) = ingest_inner(&state.store, req).await;
    (status, Json(body))
}

pub async fn list_handler(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let (status, body) = list_inner(&state.store, &state.config, query).await;
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::MemoryCollection;

    fn make_store() -> ThoughtStore {
        ThoughtStore::new(Arc::new(MemoryCollection::new()))
    }

    #[test]
    fn test_version_inner_pure() {
        let v = version_inner();
        assert!(v["version"].is_string(), "version must be string");
        assert_eq!(v["protocol"], "brain/1");
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&BrainError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&BrainError::Persistence("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_ingest_inner_unsupported_modality() {
        let store = make_store();
        let req = IngestRequest {
            content: Some("todo".to_string()),
            modality: "smell".to_string(),
            ..Default::default()
        };
        let (status, body) = ingest_inner(&store, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["error"].as_str().unwrap().contains("Unsupported modality"));
        assert!(store.list(&Default::default(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ingest_inner_valid() {
        let store = make_store();
        let (status, body) = ingest_inner(&store, IngestRequest::text("read this article")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["folder"], "reads");
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn test_list_inner_unknown_folder() {
        let store = make_store();
        ingest_inner(&store, IngestRequest::text("meeting notes")).await;
        let query = ListQuery {
            folder: Some("nonexistent-key".to_string()),
            limit: None,
        };
        let (status, body) = list_inner(&store, &BrainConfig::default(), query).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_inner_includes_version() {
        let (status, body) = health_inner(&make_store()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["database"], "available");
    }
}
