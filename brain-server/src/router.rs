use brain_core::ipc::{BrainRequest, BrainResponse};
use brain_core::{models, BrainConfig, BrainError, ThoughtFilter, ThoughtStore};
use brain_ingest::IngestRequest;

/// Maximum number of collection names reported by the health check
const HEALTH_COLLECTIONS_LIMIT: usize = 10;

pub async fn handle_request(
    request: BrainRequest,
    store: &ThoughtStore,
    config: &BrainConfig,
) -> BrainResponse {
    match request {
        BrainRequest::Ping => BrainResponse::pong(),
        BrainRequest::Health => BrainResponse::ok(health_report(store).await),
        BrainRequest::Folders => BrainResponse::ok(folders_value()),
        BrainRequest::Ingest { payload } => {
            let result = match IngestRequest::from_value(payload) {
                Ok(request) => ingest_value(store, request).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(data) => BrainResponse::ok(data),
                Err(e) => BrainResponse::err(e.to_string()),
            }
        }
        BrainRequest::List { folder, limit } => {
            match list_value(store, config, folder, limit).await {
                Ok(data) => BrainResponse::ok(data),
                Err(e) => BrainResponse::err(e.to_string()),
            }
        }
    }
}

/// Validate, route and persist one capture.
pub async fn ingest_value(
    store: &ThoughtStore,
    request: IngestRequest,
) -> Result<serde_json::Value, BrainError> {
    let outcome = brain_ingest::ingest(store, request).await?;
    Ok(serde_json::json!({
        "ok": true,
        "id": outcome.id,
        "folder": outcome.folder,
    }))
}

/// List thoughts, optionally restricted to one folder. An empty folder string
/// means no restriction.
pub async fn list_value(
    store: &ThoughtStore,
    config: &BrainConfig,
    folder: Option<String>,
    limit: Option<usize>,
) -> Result<serde_json::Value, BrainError> {
    let filter = ThoughtFilter {
        folder: folder.filter(|f| !f.is_empty()),
    };
    let limit = config.listing.effective_limit(limit);
    let items = store.list(&filter, limit).await?;
    Ok(serde_json::json!({
        "ok": true,
        "items": items,
    }))
}

pub fn folders_value() -> serde_json::Value {
    serde_json::json!(models::registry())
}

/// Descriptive store diagnostics. Failures are reported in the body, never raised.
pub async fn health_report(store: &ThoughtStore) -> serde_json::Value {
    let backend = store.backend();
    match backend.health_check().await {
        Ok(version) => {
            let collections = match backend.collection_names(HEALTH_COLLECTIONS_LIMIT).await {
                Ok(names) => serde_json::json!(names),
                Err(e) => {
                    tracing::warn!("Failed to list collections: {}", e);
                    serde_json::json!([])
                }
            };
            serde_json::json!({
                "backend": "running",
                "database": "available",
                "connection_status": "connected",
                "store": version,
                "collections": collections,
            })
        }
        Err(e) => serde_json::json!({
            "backend": "running",
            "database": format!("error: {}", truncate(&e.to_string(), 80)),
            "connection_status": "not connected",
            "collections": [],
        }),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
