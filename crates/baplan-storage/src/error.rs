use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("survey not found: {id}")]
    NotFound { id: i64 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored row is invalid: {0}")]
    Corrupt(String),

    #[error("connection lock poisoned")]
    Poisoned,

    #[error("storage task failed: {0}")]
    Task(String),
}
