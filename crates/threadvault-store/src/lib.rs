//! # threadvault Store
//!
//! Personal data layered on top of the read-only bundled dataset: curated
//! lists of tweets, comments on those tweets and locally edited revisions of
//! documents. Everything lives in a single JSON file:
//!
//! ```json
//! {
//!   "lists": [{"id": "...", "name": "...", "createdAt": "...",
//!              "items": ["doc/tweet"],
//!              "tweetComments": {"doc/tweet": [{"id": "...", "content": "...", "date": "..."}]}}],
//!   "revisions": {"doc": {"documentId": "doc", "savedAt": "...", "baseHash": "...", "document": {}}}
//! }
//! ```

pub mod models;
pub mod store;

pub use models::{Comment, CuratedList, Revision, StoreData, create_comment, document_hash};
pub use store::LocalStore;

/// Key the browser client used for the same data
pub const STORAGE_KEY: &str = "legal-documents-data";
