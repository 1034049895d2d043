//! PhotoTag metadata cache
//!
//! Keeps keywords, titles and descriptions fetched from the PhotoTag API in a
//! local JSON store, so each image is sent to the API at most once.

pub mod cli_style;
pub mod config;
pub mod legacy_import;
pub mod logging;
pub mod metadata;
pub mod metadata_manager;
pub mod output;
pub mod phototag_client;
pub mod record_store;

// Re-export commonly used types for convenience
pub use metadata::{KeywordSet, PhotoMetadata};
pub use metadata_manager::{ManagerError, MetadataManager};
pub use phototag_client::{FetchError, PhotoTagClient, PhotoTagger};
pub use record_store::{JsonRecordStore, RecordStore, Session, StoreError};
