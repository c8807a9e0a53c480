//! Route groups, each exposing `router()` over the shared [`AppState`](crate::AppState)

pub mod diff;
pub mod documents;
pub mod health;
pub mod lists;
pub mod revisions;
