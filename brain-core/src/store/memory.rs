//! In-process document collection, used for tests and the `memory` backend.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Document, DocumentCollection, DocumentFilter, DocumentId, StoredDocument};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemoryCollection {
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert(&self, collection: &str, document: Document) -> Result<DocumentId> {
        let id = DocumentId::new_v4();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body: document });
        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        let docs = match collections.get(collection) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };
        Ok(docs
            .iter()
            .filter(|d| filter.matches(&d.body))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<String> {
        Ok("in-memory".to_string())
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>> {
        Ok(self
            .collections
            .read()
            .await
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .take(limit)
            .collect())
    }
}
