//! # Link Resolution and Graph Analysis
//!
//! Provides:
//! - Recursive resolution of a tweet and everything it links to, with a
//!   per-path cycle guard
//! - A petgraph link graph over the whole dataset (backlinks, cycles)
//! - Dataset health analysis (broken and malformed links)
//!
//! ## Quick Start
//!
//! ```
//! use threadvault_core::Dataset;
//! use threadvault_graph::LinkResolver;
//!
//! let dataset = Dataset::from_json_str(r#"{
//!   "docA": {"displayName": "A", "accountId": "a1", "tweets": [
//!     {"id": "1", "text": "hi", "links": [{"url": "docA/2", "label": "see"}]},
//!     {"id": "2", "text": "bye"}
//!   ]}
//! }"#).unwrap();
//!
//! let resolved = LinkResolver::new(&dataset).resolve("docA", "1").unwrap();
//! let links = resolved.links.unwrap();
//! assert_eq!(links[0].content.as_ref().unwrap().id, "2");
//! ```
//!
//! ## Cycle Handling
//!
//! A link back to any tweet already on the path from the root resolves to
//! `content: null`. The guard is per path: a tweet reachable through two
//! sibling links is resolved under both.
//!
//! ## Modules
//!
//! - [`resolver`] - Link resolver
//! - [`graph`] - LinkGraph
//! - [`health`] - Dataset health analysis

pub mod graph;
pub mod health;
pub mod resolver;

pub use graph::{GraphStats, LinkGraph, UnresolvedLink};
pub use health::{BrokenLink, HealthAnalyzer, HealthReport};
pub use resolver::{AncestorPath, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, LinkResolver, Resolution};

pub mod prelude {
    pub use crate::graph::{GraphStats, LinkGraph};
    pub use crate::health::{BrokenLink, HealthAnalyzer, HealthReport};
    pub use crate::resolver::{AncestorPath, LinkResolver, Resolution};
    pub use threadvault_core::prelude::*;
}
