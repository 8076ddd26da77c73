use std::sync::Arc;

use brain_core::store::DocumentCollection;
use brain_core::{BrainConfig, MemoryCollection, PgCollection, StoreBackend, ThoughtStore};

/// Build the document collection selected by `store.backend`.
pub async fn open_collection(config: &BrainConfig) -> anyhow::Result<Arc<dyn DocumentCollection>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; thoughts are lost on restart");
            Ok(Arc::new(MemoryCollection::new()))
        }
        StoreBackend::Postgres => {
            let pool = brain_core::db::create_pool(&config.database).await?;
            brain_core::db::ensure_schema(&pool).await?;
            Ok(Arc::new(PgCollection::new(pool)))
        }
    }
}

pub async fn open_store(config: &BrainConfig) -> anyhow::Result<ThoughtStore> {
    let collection = open_collection(config).await?;
    Ok(ThoughtStore::with_collection(collection, config.store.collection.clone()))
}
