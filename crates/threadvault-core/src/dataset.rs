//! The bundled dataset: every document from `documents.json`, loaded once.
//!
//! A [`Dataset`] keeps both the typed documents (for resolution and
//! rendering) and the raw JSON it was built from, so API responses that
//! return whole documents are byte-for-byte faithful to the source file.

use crate::error::{Error, Result};
use crate::models::{Document, PathKey, Tweet};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Immutable, shareable snapshot of all documents
#[derive(Debug, Clone)]
pub struct Dataset {
    raw: Value,
    documents: Vec<(String, Document)>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset from an already-parsed JSON value.
    ///
    /// The value must be an object mapping document ids to documents.
    pub fn from_value(raw: Value) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            Error::parse_error("dataset must be a JSON object keyed by document id")
        })?;

        let mut documents = Vec::with_capacity(object.len());
        let mut index = HashMap::with_capacity(object.len());

        for (id, value) in object {
            let document: Document = serde_json::from_value(value.clone()).map_err(|e| {
                Error::parse_error(format!("invalid document '{}': {}", id, e))
            })?;
            index.insert(id.clone(), documents.len());
            documents.push((id.clone(), document));
        }

        Ok(Self {
            raw,
            documents,
            index,
        })
    }

    /// Parse a dataset from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| Error::parse_error(format!("invalid dataset JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Load a dataset from disk (blocking)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let content = std::fs::read_to_string(path).map_err(Error::io)?;
        let dataset = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} documents ({} tweets) from {}",
            dataset.len(),
            dataset.tweet_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load a dataset from disk without blocking the runtime
    pub async fn load_async(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.map_err(Error::io)? {
            return Err(Error::file_not_found(path));
        }
        let content = tokio::fs::read_to_string(path).await.map_err(Error::io)?;
        let dataset = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} documents ({} tweets) from {}",
            dataset.len(),
            dataset.tweet_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Look up a document by id
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.documents[i].1)
    }

    /// Look up a tweet by path-key components
    pub fn tweet(&self, document_id: &str, tweet_id: &str) -> Option<&Tweet> {
        self.document(document_id)?.tweet(tweet_id)
    }

    /// Whether a path-key names an existing tweet
    pub fn contains(&self, key: &PathKey) -> bool {
        self.tweet(&key.document_id, &key.tweet_id).is_some()
    }

    /// Raw JSON of one document, exactly as loaded
    pub fn raw_document(&self, id: &str) -> Option<&Value> {
        self.raw.get(id)
    }

    /// Raw JSON of the whole dataset, exactly as loaded
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Documents in file order
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.documents.iter().map(|(id, doc)| (id.as_str(), doc))
    }

    /// Every tweet path-key in file order
    pub fn path_keys(&self) -> impl Iterator<Item = PathKey> + '_ {
        self.documents.iter().flat_map(|(id, doc)| {
            doc.tweets.iter().map(move |t| PathKey::new(id.clone(), t.id.clone()))
        })
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the dataset has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of tweets across all documents
    pub fn tweet_count(&self) -> usize {
        self.documents.iter().map(|(_, d)| d.tweets.len()).sum()
    }
}
