//! Thought store
//!
//! Persists routed thoughts into a [`DocumentCollection`] and lists them back
//! filtered by folder. Routing happens before `create` is called; the store
//! only requires that the thought already carries a folder.
//!
//! Every read path converts the backend identifier into a plain string `id`.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::error::{BrainError, Result};
use crate::models::{Thought, ThoughtRecord};
use crate::store::{DocumentCollection, DocumentFilter, StoredDocument};

pub const DEFAULT_COLLECTION: &str = "thought";

/// Optional folder restriction for [`ThoughtStore::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtFilter {
    pub folder: Option<String>,
}

impl ThoughtFilter {
    pub fn folder(folder: impl Into<String>) -> Self {
        Self {
            folder: Some(folder.into()),
        }
    }

    fn to_document_filter(&self) -> DocumentFilter {
        match &self.folder {
            Some(folder) => DocumentFilter::all().with_field("folder", folder.as_str()),
            None => DocumentFilter::all(),
        }
    }
}

#[derive(Clone)]
pub struct ThoughtStore {
    backend: Arc<dyn DocumentCollection>,
    collection: String,
}

impl ThoughtStore {
    pub fn new(backend: Arc<dyn DocumentCollection>) -> Self {
        Self::with_collection(backend, DEFAULT_COLLECTION)
    }

    pub fn with_collection(backend: Arc<dyn DocumentCollection>, collection: impl Into<String>) -> Self {
        Self {
            backend,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn backend(&self) -> &Arc<dyn DocumentCollection> {
        &self.backend
    }

    /// Persist a routed thought and return its new identifier.
    ///
    /// Missing `created_at` / `updated_at` are stamped with the current time.
    pub async fn create(&self, mut thought: Thought) -> Result<String> {
        thought.stamp(Utc::now());

        let document = match serde_json::to_value(&thought)? {
            Value::Object(map) => map,
            _ => return Err(BrainError::Other("thought did not serialize to an object".into())),
        };

        let id = self
            .backend
            .insert(&self.collection, document)
            .await
            .inspect_err(|e| tracing::error!("Failed to persist thought: {}", e))?;

        Ok(id.to_string())
    }

    /// Up to `limit` thoughts, restricted to `filter.folder` when given, in
    /// store-natural (insertion) order. An unknown folder yields an empty list.
    pub async fn list(&self, filter: &ThoughtFilter, limit: usize) -> Result<Vec<ThoughtRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let docs = self
            .backend
            .query(&self.collection, &filter.to_document_filter(), limit)
            .await?;

        docs.into_iter().take(limit).map(into_record).collect()
    }
}

fn into_record(doc: StoredDocument) -> Result<ThoughtRecord> {
    let mut body = doc.body;
    // a stored body never carries its own id; drop any stray one so it cannot shadow ours
    body.remove("id");
    let thought: Thought = serde_json::from_value(Value::Object(body))?;
    Ok(ThoughtRecord {
        id: doc.id.to_string(),
        thought,
    })
}
