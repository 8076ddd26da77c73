//! Document collection abstraction
//!
//! The thought store only needs two things from its backing database: insert a
//! JSON document into a named collection, and query a collection by field
//! equality with a limit. Backends implement [`DocumentCollection`]; identifiers
//! come back as an opaque [`DocumentId`] that callers outside the store never see.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::error::Result;

pub use memory::MemoryCollection;
pub use postgres::PgCollection;

/// A stored document body (a JSON object without its identifier).
pub type Document = Map<String, Value>;

/// Backend-assigned identifier. Only the thought store turns this into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub(crate) fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub(crate) fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: Document,
}

/// Top-level field equality constraints. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    fields: Document,
}

impl DocumentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    /// The filter as a JSON object, for backends with containment queries.
    pub fn as_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Insert a document and return its generated identifier.
    async fn insert(&self, collection: &str, document: Document) -> Result<DocumentId>;

    /// Up to `limit` documents matching `filter`, in insertion order.
    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>>;

    /// Short description of the backend when reachable.
    async fn health_check(&self) -> Result<String>;

    /// Names of collections holding at least one document.
    async fn collection_names(&self, limit: usize) -> Result<Vec<String>>;
}
