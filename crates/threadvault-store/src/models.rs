//! Records persisted in the local store file

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use threadvault_core::Fields;
use uuid::Uuid;

/// Current time as an RFC 3339 UTC timestamp with millisecond precision
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A note attached to a tweet within a curated list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub date: String,
}

/// Build a new comment with a fresh id and the current time
pub fn create_comment(content: impl Into<String>) -> Comment {
    Comment {
        id: Uuid::new_v4().to_string(),
        content: content.into(),
        date: now_timestamp(),
    }
}

/// A named collection of tweet path-keys with per-tweet comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    /// Tweet path-keys (`documentId/tweetId`) in insertion order
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub tweet_comments: BTreeMap<String, Vec<Comment>>,
    /// Fields written by other clients, kept as-is
    #[serde(flatten)]
    pub extra: Fields,
}

impl CuratedList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now_timestamp(),
            items: Vec::new(),
            tweet_comments: BTreeMap::new(),
            extra: Fields::new(),
        }
    }

    pub fn contains(&self, tweet_path: &str) -> bool {
        self.items.iter().any(|item| item == tweet_path)
    }
}

/// A locally edited copy of a bundled document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub document_id: String,
    pub saved_at: String,
    /// [`document_hash`] of the bundled document the edit started from
    #[serde(default)]
    pub base_hash: String,
    pub document: Value,
}

impl Revision {
    /// Whether the bundled document changed after this revision was taken
    pub fn is_stale(&self, bundled: &Value) -> bool {
        !self.base_hash.is_empty() && self.base_hash != document_hash(bundled)
    }
}

/// Whole contents of the store file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub lists: Vec<CuratedList>,
    #[serde(default)]
    pub revisions: BTreeMap<String, Revision>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl StoreData {
    pub fn list(&self, id: &str) -> Option<&CuratedList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn list_mut(&mut self, id: &str) -> Option<&mut CuratedList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }
}

/// SHA-256 hex digest of a document's compact JSON form
pub fn document_hash(document: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.to_string().as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
