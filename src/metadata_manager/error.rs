use crate::phototag_client::FetchError;
use crate::record_store::StoreError;
use thiserror::Error;

pub type ManagerResult<T> = std::result::Result<T, ManagerError>;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Metadata for file '{0}' already exists in the database.")]
    AlreadyExists(String),

    #[error("Could not fetch metadata for file '{0}'.")]
    FetchFailed(String),

    #[error("Stored record is not valid photo metadata: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}
