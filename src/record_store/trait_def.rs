//! RecordStore trait definition.

use super::error::{StoreError, StoreResult};
use serde_json::Value;
use std::path::Path;

/// A single stored row: a flat JSON object carrying at least `id` and `filename`.
pub type Document = serde_json::Map<String, Value>;

/// Returns the final path component of `path`, or `path` itself when it has none.
pub fn base_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Trait for metadata storage backends.
///
/// Every data operation fails with [`StoreError::NotConnected`] unless it runs
/// between a `connect` and its matching `close`. Use [`super::Session`] to
/// bracket a unit of work.
pub trait RecordStore: Send + Sync {
    // =========================================================================
    // Session
    // =========================================================================

    /// Acquire the backing resource. Calls nest, every `connect` needs a `close`.
    fn connect(&self) -> StoreResult<()>;

    /// Release one level of acquisition. Closing a store that is not
    /// connected is a no-op.
    fn close(&self) -> StoreResult<()>;

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new document, failing with `DuplicateKey` if its `id` is taken.
    fn insert(&self, document: &Document) -> StoreResult<()>;

    /// Replace the fields of an existing document, failing with `NotFound`
    /// if no document has this `id`.
    fn update(&self, document: &Document) -> StoreResult<()>;

    /// Update if present, insert otherwise.
    fn upsert(&self, document: &Document) -> StoreResult<()> {
        let id = required_str(document, "id")?;
        required_str(document, "filename")?;
        if self.get_by_id(id)?.is_some() {
            self.update(document)
        } else {
            self.insert(document)
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Documents whose `field` equals `value`, in no particular order.
    fn search(&self, field: &str, value: &Value) -> StoreResult<Vec<Document>>;

    /// Every stored document.
    fn all(&self) -> StoreResult<Vec<Document>>;

    fn get_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .search("id", &Value::String(id.to_string()))?
            .into_iter()
            .next())
    }

    /// Looks up by the basename of `path`, so `photo.jpg` and
    /// `/some/dir/photo.jpg` resolve to the same document.
    fn get_by_filename(&self, path: &str) -> StoreResult<Option<Document>> {
        self.get_by_id(&base_filename(path))
    }
}

/// Extracts a required string key, as every write needs `id` and `filename`.
pub(crate) fn required_str<'a>(document: &'a Document, key: &'static str) -> StoreResult<&'a str> {
    document
        .get(key)
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingField(key))
}
