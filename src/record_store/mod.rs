mod error;
mod json_store;
mod session;
mod trait_def;

pub use error::{StoreError, StoreResult};
pub use json_store::JsonRecordStore;
pub use session::Session;
pub use trait_def::{base_filename, Document, RecordStore};
