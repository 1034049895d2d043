//! JSON-file-backed record store.
//!
//! The file layout is the one TinyDB writes (`{"_default": {"1": {...}}}`),
//! so databases created by earlier tools keep working. Tables other than
//! `_default` are carried through untouched.

use super::error::{StoreError, StoreResult};
use super::trait_def::{required_str, Document, RecordStore};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const DEFAULT_TABLE: &str = "_default";

/// Rows keyed by their document number ("1", "2", ...).
type Table = BTreeMap<String, Document>;
type Dump = BTreeMap<String, Table>;

#[derive(Default)]
struct State {
    depth: usize,
    dump: Dump,
}

impl State {
    fn table(&self) -> StoreResult<&Table> {
        if self.depth == 0 {
            return Err(StoreError::NotConnected);
        }
        Ok(self.dump.get(DEFAULT_TABLE).unwrap_or(&EMPTY_TABLE))
    }
}

static EMPTY_TABLE: Table = BTreeMap::new();

pub struct JsonRecordStore {
    file_path: PathBuf,
    state: Mutex<State>,
}

impl JsonRecordStore {
    /// Selects the store at `file_path`. Nothing touches the disk until the
    /// first `connect`, which creates the file if it does not exist yet.
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_connected(&self) -> bool {
        self.lock().depth > 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_dump(&self) -> StoreResult<Dump> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) if content.trim().is_empty() => Ok(Dump::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("Creating new record store at {:?}", self.file_path);
                let mut dump = Dump::default();
                dump.insert(DEFAULT_TABLE.to_string(), Table::new());
                self.save_dump(&dump)?;
                Ok(dump)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a sibling temp file and renames it over the store, so a
    /// reader never observes a half-written file.
    fn save_dump(&self, dump: &Dump) -> StoreResult<()> {
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, dump)?;
        tmp.flush()?;
        tmp.persist(&self.file_path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Runs `change` against a fresh read of the file and writes the result
    /// back. Re-reading first means a row created by another process since
    /// `connect` is seen, and surfaces as `DuplicateKey` on insert.
    fn mutate<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Table) -> StoreResult<()>,
    {
        let mut state = self.lock();
        if state.depth == 0 {
            return Err(StoreError::NotConnected);
        }
        state.dump = self.load_dump()?;
        let table = state.dump.entry(DEFAULT_TABLE.to_string()).or_default();
        change(table)?;
        self.save_dump(&state.dump)
    }
}

fn find_doc_key(table: &Table, id: &str) -> Option<String> {
    table
        .iter()
        .find(|(_, doc)| doc.get("id").and_then(Value::as_str) == Some(id))
        .map(|(key, _)| key.clone())
}

fn next_doc_key(table: &Table) -> String {
    let last = table
        .keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (last + 1).to_string()
}

impl RecordStore for JsonRecordStore {
    fn connect(&self) -> StoreResult<()> {
        let mut state = self.lock();
        if state.depth == 0 {
            debug!("Opening record store {:?}", self.file_path);
            state.dump = self.load_dump()?;
        }
        state.depth += 1;
        Ok(())
    }

    fn close(&self) -> StoreResult<()> {
        let mut state = self.lock();
        match state.depth {
            0 => {}
            1 => {
                debug!("Closing record store {:?}", self.file_path);
                state.depth = 0;
                state.dump.clear();
            }
            _ => state.depth -= 1,
        }
        Ok(())
    }

    fn insert(&self, document: &Document) -> StoreResult<()> {
        let id = required_str(document, "id")?;
        required_str(document, "filename")?;
        self.mutate(|table| {
            if find_doc_key(table, id).is_some() {
                return Err(StoreError::DuplicateKey(id.to_string()));
            }
            debug!("Inserting record {}", id);
            table.insert(next_doc_key(table), document.clone());
            Ok(())
        })
    }

    fn update(&self, document: &Document) -> StoreResult<()> {
        let id = required_str(document, "id")?;
        required_str(document, "filename")?;
        self.mutate(|table| {
            let key =
                find_doc_key(table, id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if let Some(existing) = table.get_mut(&key) {
                debug!("Updating record {}", id);
                for (field, value) in document {
                    existing.insert(field.clone(), value.clone());
                }
            }
            Ok(())
        })
    }

    fn search(&self, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
        let state = self.lock();
        let table = state.table()?;
        let found = table
            .values()
            .filter(|doc| doc.get(field) == Some(value))
            .cloned()
            .collect();
        Ok(found)
    }

    fn all(&self) -> StoreResult<Vec<Document>> {
        let state = self.lock();
        let table = state.table()?;
        let documents = table.values().cloned().collect();
        Ok(documents)
    }
}
