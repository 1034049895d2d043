use super::error::{ManagerError, ManagerResult};
use crate::metadata::PhotoMetadata;
use crate::phototag_client::PhotoTagger;
use crate::record_store::{Document, RecordStore, Session};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reconciles the local record store with the remote tagging API.
///
/// Every public operation opens its own store session and closes it before
/// returning, so other processes see a flushed file between operations.
pub struct MetadataManager {
    store: Box<dyn RecordStore>,
    tagger: Box<dyn PhotoTagger>,
}

impl MetadataManager {
    pub fn new(store: Box<dyn RecordStore>, tagger: Box<dyn PhotoTagger>) -> Self {
        Self { store, tagger }
    }

    pub fn all(&self) -> ManagerResult<Vec<PhotoMetadata>> {
        let session = Session::open(self.store.as_ref())?;
        to_records(session.all()?)
    }

    pub fn search(&self, field: &str, value: &Value) -> ManagerResult<Vec<PhotoMetadata>> {
        let session = Session::open(self.store.as_ref())?;
        to_records(session.search(field, value)?)
    }

    /// Returns the stored metadata for `filename`, fetching it from the API
    /// when the store has none.
    ///
    /// Every tag in `default_tags` is then guaranteed present and every tag
    /// in `removed_tags` absent. Additions are applied first, so a tag listed
    /// in both ends up removed. Each applied delta is persisted.
    pub fn get_or_fetch<S: AsRef<str>>(
        &self,
        filename: &str,
        default_tags: &[S],
        removed_tags: &[S],
    ) -> ManagerResult<PhotoMetadata> {
        let metadata = match self.get_by_filename(filename)? {
            Some(metadata) => {
                debug!("Cache hit for {}", filename);
                Some(metadata)
            }
            None => self.fetch_for_file(filename, false)?,
        };
        let metadata = metadata.ok_or_else(|| ManagerError::FetchFailed(filename.to_string()))?;
        self.apply_tag_deltas(metadata, default_tags, removed_tags)
    }

    /// Applies `default_tags` then `removed_tags`, persisting only the deltas
    /// that were actually requested.
    pub fn apply_tag_deltas<S: AsRef<str>>(
        &self,
        mut metadata: PhotoMetadata,
        default_tags: &[S],
        removed_tags: &[S],
    ) -> ManagerResult<PhotoMetadata> {
        if !default_tags.is_empty() {
            metadata = self.ensure_keywords(metadata, default_tags)?;
        }
        if !removed_tags.is_empty() {
            metadata = self.remove_keywords(metadata, removed_tags)?;
        }
        Ok(metadata)
    }

    /// Looks up by id, falling back to a remote fetch keyed by the id.
    ///
    /// A failed or empty fetch is not an error here, it yields `None`.
    pub fn get_by_id(&self, id: &str) -> ManagerResult<Option<PhotoMetadata>> {
        {
            let session = Session::open(self.store.as_ref())?;
            if let Some(document) = session.get_by_id(id)? {
                return Ok(Some(PhotoMetadata::from_document(document)?));
            }
        }

        let attributes = match self.tagger.fetch_for_file(Path::new(id)) {
            Ok(Some(attributes)) => attributes,
            Ok(None) => return Ok(None),
            Err(err) => {
                warn!("Fetching {} from the API failed: {}", id, err);
                return Ok(None);
            }
        };

        let metadata = PhotoMetadata::from_attributes(id, attributes)?;
        let session = Session::open(self.store.as_ref())?;
        session.insert(&metadata.to_document())?;
        info!("Stored fetched metadata for {}", metadata.id);
        Ok(Some(metadata))
    }

    pub fn get_by_filename(&self, filename: &str) -> ManagerResult<Option<PhotoMetadata>> {
        let session = Session::open(self.store.as_ref())?;
        session
            .get_by_filename(filename)?
            .map(PhotoMetadata::from_document)
            .transpose()
            .map_err(ManagerError::from)
    }

    /// Fetches metadata for `filename` from the API and stores it.
    ///
    /// Refuses with `AlreadyExists` when the store already has the file,
    /// unless `force` is set. Returns `None` when the API had no data.
    pub fn fetch_for_file(&self, filename: &str, force: bool) -> ManagerResult<Option<PhotoMetadata>> {
        if !force && self.get_by_filename(filename)?.is_some() {
            return Err(ManagerError::AlreadyExists(filename.to_string()));
        }

        info!("Fetching metadata for {}", filename);
        let Some(attributes) = self.tagger.fetch_for_file(Path::new(filename))? else {
            warn!("No metadata returned for {}", filename);
            return Ok(None);
        };

        let metadata = PhotoMetadata::from_attributes(filename, attributes)?;
        self.update_db(metadata).map(Some)
    }

    /// Makes sure every keyword in `required` is present, and persists the record.
    pub fn ensure_keywords<S: AsRef<str>>(
        &self,
        mut metadata: PhotoMetadata,
        required: &[S],
    ) -> ManagerResult<PhotoMetadata> {
        metadata.append_keywords(required);
        debug!("Ensured {} keywords on {}", required.len(), metadata.id);
        self.update_db(metadata)
    }

    /// Drops every keyword in `to_remove`, and persists the record.
    pub fn remove_keywords<S: AsRef<str>>(
        &self,
        mut metadata: PhotoMetadata,
        to_remove: &[S],
    ) -> ManagerResult<PhotoMetadata> {
        metadata.remove_keywords(to_remove);
        debug!("Removed up to {} keywords from {}", to_remove.len(), metadata.id);
        self.update_db(metadata)
    }

    fn update_db(&self, metadata: PhotoMetadata) -> ManagerResult<PhotoMetadata> {
        let session = Session::open(self.store.as_ref())?;
        session.upsert(&metadata.to_document())?;
        Ok(metadata)
    }
}

fn to_records(documents: Vec<Document>) -> ManagerResult<Vec<PhotoMetadata>> {
    documents
        .into_iter()
        .map(|document| PhotoMetadata::from_document(document).map_err(ManagerError::from))
        .collect()
}
