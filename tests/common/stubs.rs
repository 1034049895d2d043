#![allow(dead_code)]

use phototag::phototag_client::FetchError;
use phototag::record_store::{Document, StoreResult};
use phototag::{JsonRecordStore, MetadataManager, PhotoMetadata, PhotoTagger, RecordStore, Session};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Tagger answering every request with the same canned attributes.
#[derive(Clone)]
pub struct StubTagger {
    response: Option<Value>,
    calls: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<PathBuf>>>,
    fail_with_status: Option<u16>,
}

impl StubTagger {
    pub fn returning(response: Value) -> Self {
        Self {
            response: Some(response),
            calls: Arc::new(AtomicUsize::new(0)),
            paths: Arc::new(Mutex::new(vec![])),
            fail_with_status: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            response: None,
            ..Self::returning(Value::Null)
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::empty()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }

    pub fn boxed(&self) -> Box<dyn PhotoTagger> {
        Box::new(self.clone())
    }
}

impl PhotoTagger for StubTagger {
    fn fetch_for_file(&self, path: &Path) -> Result<Option<Document>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(path.to_path_buf());
        if let Some(status) = self.fail_with_status {
            return Err(FetchError::Http {
                status,
                url: "http://stub".to_string(),
            });
        }
        Ok(self.response.as_ref().and_then(|v| v.as_object().cloned()))
    }
}

/// Record store wrapper counting the writes that reach the backend.
pub struct CountingStore {
    inner: JsonRecordStore,
    upserts: Arc<AtomicUsize>,
    inserts: Arc<AtomicUsize>,
}

impl RecordStore for CountingStore {
    fn connect(&self) -> StoreResult<()> {
        self.inner.connect()
    }

    fn close(&self) -> StoreResult<()> {
        self.inner.close()
    }

    fn insert(&self, document: &Document) -> StoreResult<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(document)
    }

    fn update(&self, document: &Document) -> StoreResult<()> {
        self.inner.update(document)
    }

    fn upsert(&self, document: &Document) -> StoreResult<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert(document)
    }

    fn search(&self, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
        self.inner.search(field, value)
    }

    fn all(&self) -> StoreResult<Vec<Document>> {
        self.inner.all()
    }
}

/// A store file in a temp dir, handing out independent handles to it.
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
    upserts: Arc<AtomicUsize>,
    inserts: Arc<AtomicUsize>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("phototag_db.json");
        Self {
            dir,
            path,
            upserts: Arc::new(AtomicUsize::new(0)),
            inserts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn handle(&self) -> JsonRecordStore {
        JsonRecordStore::new(&self.path)
    }

    pub fn counting(&self) -> Box<dyn RecordStore> {
        Box::new(CountingStore {
            inner: self.handle(),
            upserts: self.upserts.clone(),
            inserts: self.inserts.clone(),
        })
    }

    pub fn manager(&self, tagger: Box<dyn PhotoTagger>) -> MetadataManager {
        MetadataManager::new(self.counting(), tagger)
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn seed(&self, metadata: &PhotoMetadata) {
        let store = self.handle();
        let session = Session::open(&store).unwrap();
        session.insert(&metadata.to_document()).unwrap();
    }

    pub fn stored(&self, id: &str) -> Option<PhotoMetadata> {
        let store = self.handle();
        let session = Session::open(&store).unwrap();
        session
            .get_by_id(id)
            .unwrap()
            .map(|doc| PhotoMetadata::from_document(doc).unwrap())
    }

    pub fn count(&self) -> usize {
        let store = self.handle();
        let session = Session::open(&store).unwrap();
        session.all().unwrap().len()
    }
}
