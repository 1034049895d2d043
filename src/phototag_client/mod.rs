//! The remote tagging API: the [`PhotoTagger`] seam and its HTTP client.

mod client;
mod error;
mod payload;

pub use client::{PhotoTagClient, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
pub use error::FetchError;
pub use payload::{default_payload, Payload};

use crate::record_store::Document;
use std::path::Path;

/// Anything that can turn an image file into a raw attribute mapping.
pub trait PhotoTagger: Send + Sync {
    /// Returns `Ok(None)` when the service answered but had no data for the file.
    fn fetch_for_file(&self, path: &Path) -> Result<Option<Document>, FetchError>;
}
