//! Postgres document collection
//!
//! All collections share one `documents` table (see [`crate::db::ensure_schema`]).
//! Bodies are JSONB; field-equality filters become a JSONB containment test and
//! results come back in insertion order (`seq`).

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Document, DocumentCollection, DocumentFilter, DocumentId, StoredDocument};
use crate::error::{BrainError, Result};

#[derive(Debug, Clone)]
pub struct PgCollection {
    pool: PgPool,
}

impl PgCollection {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentCollection for PgCollection {
    async fn insert(&self, collection: &str, document: Document) -> Result<DocumentId> {
        let id = DocumentId::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(collection)
        .bind(Json(Value::Object(document)))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, (Uuid, Json<Value>)>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = $1 AND body @> $2
            ORDER BY seq
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Json(filter.as_json()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, Json(body))| match body {
                Value::Object(body) => Ok(StoredDocument {
                    id: DocumentId::from_uuid(id),
                    body,
                }),
                other => Err(BrainError::Persistence(format!(
                    "document {} is not an object: {}",
                    id, other
                ))),
            })
            .collect()
    }

    async fn health_check(&self) -> Result<String> {
        Ok(crate::db::health_check(&self.pool).await?)
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
