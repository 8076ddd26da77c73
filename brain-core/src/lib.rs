pub mod config;
pub mod db;
pub mod error;
pub mod ipc;
pub mod models;
pub mod store;
pub mod thoughts;

pub use config::{BrainConfig, StoreBackend};
pub use error::{BrainError, Result};
pub use models::{Folder, FolderKey, Meta, MetaValue, Modality, Thought, ThoughtRecord, ThoughtStatus};
pub use store::{DocumentCollection, MemoryCollection, PgCollection};
pub use thoughts::{ThoughtFilter, ThoughtStore};
