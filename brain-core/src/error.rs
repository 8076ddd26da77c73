use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrainError {
    /// Caller input rejected before anything is persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The document collection is unreachable, rejected a write, or a query failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl BrainError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<sqlx::Error> for BrainError {
    fn from(e: sqlx::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for BrainError {
    fn from(e: serde_json::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BrainError>;
