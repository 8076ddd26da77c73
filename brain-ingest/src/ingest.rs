//! Ingestion boundary: validate, route, persist.
//!
//! Routing and persistence stay separate steps so the classification policy
//! can change without touching the store.

use brain_core::models::{MetaValue, Modality, Thought};
use brain_core::{BrainError, FolderKey, Result, ThoughtStore};
use serde::{Deserialize, Serialize};

use crate::routing::{FolderRouter, HeuristicRouter};

/// Raw capture as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub modality: String,
    pub source_url: Option<String>,
    pub image_data_url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl IngestRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            modality: Modality::Text.as_str().to_string(),
            ..Default::default()
        }
    }

    /// Parse a loosely-typed payload (IPC frames carry raw JSON).
    pub fn from_value(payload: serde_json::Value) -> Result<Self> {
        serde_json::from_value(payload)
            .map_err(|e| BrainError::Validation(format!("Invalid ingest payload: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub id: String,
    pub folder: FolderKey,
}

/// Ingest with the default heuristic router.
pub async fn ingest(store: &ThoughtStore, request: IngestRequest) -> Result<IngestOutcome> {
    ingest_with_router(store, &HeuristicRouter, request).await
}

pub async fn ingest_with_router(
    store: &ThoughtStore,
    router: &dyn FolderRouter,
    request: IngestRequest,
) -> Result<IngestOutcome> {
    // reject before anything is written
    let modality: Modality = request.modality.parse()?;

    let folder = router.route(request.content.as_deref(), request.tags.as_deref());
    tracing::debug!("Routed {} thought to {} ({})", modality, folder, router.version());

    let mut thought = Thought::new(modality, folder);
    thought.title = request.title;
    thought.content = request.content;
    thought.source_url = request.source_url;
    thought.image_data_url = request.image_data_url;
    thought.tags = request.tags.unwrap_or_default();
    thought
        .meta
        .insert("routed_by".to_string(), MetaValue::from(router.version()));

    let id = store.create(thought).await?;
    tracing::info!("Ingested thought {} into {}", id, folder);

    Ok(IngestOutcome { id, folder })
}
