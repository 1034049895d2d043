use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not connected.")]
    NotConnected,

    #[error("Data with id '{0}' already exists in the database.")]
    DuplicateKey(String),

    #[error("No record found with id '{0}'.")]
    NotFound(String),

    #[error("Data must contain '{0}' key.")]
    MissingField(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed database file: {0}")]
    Json(#[from] serde_json::Error),
}
