//! # threadvault Core
//!
//! Core data models, dataset loading, error types and configuration for the
//! threadvault document viewer. Every other crate in the workspace depends on
//! the types defined here.
//!
//! ## Core Modules
//!
//! - [`models`] - Documents, tweets, links and the resolved read model
//! - [`dataset`] - The immutable, load-once bundled dataset
//! - [`error`] - Error type and Result alias
//! - [`config`] - Layered server configuration
//! - [`profiles`] - Configuration profiles
//! - [`utils`] - Serialization, HTML escaping and path helpers
//!
//! ## Usage Examples
//!
//! ```
//! use threadvault_core::prelude::*;
//!
//! let dataset = Dataset::from_json_str(r#"{
//!     "docA": {"displayName": "A", "accountId": "a1",
//!              "tweets": [{"id": "1", "text": "hi"}]}
//! }"#).unwrap();
//!
//! let doc = dataset.document("docA").unwrap();
//! assert_eq!(doc.tweet("1").unwrap().text(), Some("hi"));
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use threadvault_core::prelude::*;
//!
//! fn lookup(dataset: &Dataset, id: &str) -> Result<()> {
//!     dataset
//!         .document(id)
//!         .ok_or_else(|| Error::document_not_found(id))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod profiles;
pub mod utils;

pub use config::*;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use models::*;
pub use profiles::ConfigProfile;
pub use utils::{PathValidator, escape_html, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::ServerConfig;
    pub use crate::dataset::Dataset;
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Document, DocumentSummary, Fields, Link, PathKey, ResolvedLink, ResolvedTweet, Tweet,
    };
    pub use crate::profiles::ConfigProfile;
}
