//! Import of the plain-text results files written by older versions of the tool.
//!
//! Each entry is five lines (filename, `", "`-joined keywords, hashtag line,
//! title, description) followed by a dashed separator line.

use crate::metadata::PhotoMetadata;
use crate::record_store::{RecordStore, Session, StoreError, StoreResult};
use tracing::{debug, warn};

const LINES_PER_ENTRY: usize = 6;

fn non_empty(line: &str) -> Option<String> {
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn parse_entry(lines: &[&str]) -> PhotoMetadata {
    let mut metadata = PhotoMetadata::new(lines[0].trim());
    let keywords: Vec<&str> = lines[1].split(", ").filter(|k| !k.is_empty()).collect();
    metadata.append_keywords(&keywords[..]);
    // lines[2] holds the hashtag rendering, which is derived from the keywords.
    metadata.title = non_empty(lines[3]);
    metadata.description = non_empty(lines[4]);
    metadata
}

/// Parses a results file. A trailing entry with fewer than five lines is dropped.
pub fn parse_results(content: &str) -> Vec<PhotoMetadata> {
    let mut entries = Vec::new();
    let mut block: Vec<&str> = Vec::with_capacity(LINES_PER_ENTRY - 1);
    for (index, line) in content.lines().enumerate() {
        if (index + 1) % LINES_PER_ENTRY == 0 {
            continue;
        }
        block.push(line);
        if block.len() == LINES_PER_ENTRY - 1 {
            entries.push(parse_entry(&block));
            block.clear();
        }
    }
    if !block.is_empty() {
        warn!("Ignoring incomplete trailing entry of {} lines", block.len());
    }
    entries
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: Vec<String>,
}

/// Stores `records`. Existing ids are skipped, or overwritten when `replace` is set.
pub fn import_records<S: RecordStore + ?Sized>(
    store: &S,
    records: &[PhotoMetadata],
    replace: bool,
) -> StoreResult<ImportSummary> {
    let session = Session::open(store)?;
    let mut summary = ImportSummary::default();
    for metadata in records {
        let document = metadata.to_document();
        match session.insert(&document) {
            Ok(()) => summary.inserted += 1,
            Err(StoreError::DuplicateKey(id)) if replace => {
                session.update(&document)?;
                debug!("Replaced {}", id);
                summary.replaced += 1;
            }
            Err(StoreError::DuplicateKey(id)) => summary.skipped.push(id),
            Err(err) => return Err(err),
        }
    }
    Ok(summary)
}
