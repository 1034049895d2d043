//! Common test infrastructure
//!
//! Stub collaborators for the metadata manager plus a one-shot HTTP
//! responder for exercising the real API client.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestStore, StubTagger};
//!
//! #[test]
//! fn test_fetch() {
//!     let store = TestStore::new();
//!     let tagger = StubTagger::returning(serde_json::json!({"keywords": ["sky"]}));
//!     let manager = store.manager(tagger.boxed());
//! }
//! ```

mod http;
mod stubs;

pub use http::OneShotServer;
pub use stubs::{CountingStore, StubTagger, TestStore};

#[allow(dead_code)]
pub const NO_TAGS: &[&str] = &[];
