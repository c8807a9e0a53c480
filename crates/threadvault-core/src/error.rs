//! Error types for threadvault.
//!
//! All fallible operations outside the link resolver return [`Error`].
//! The resolver itself never fails: missing and cyclic targets are
//! reported as absence, not as errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all threadvault operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path escapes its root directory
    #[error("Path traversal detected: {path}")]
    PathTraversalAttempt { path: PathBuf },

    /// Document key not present in the dataset
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    /// Tweet id not present in its document
    #[error("Tweet not found: {document_id}/{tweet_id}")]
    TweetNotFound {
        document_id: String,
        tweet_id: String,
    },

    /// Curated list not present in the local store
    #[error("List not found: {id}")]
    ListNotFound { id: String },

    /// Malformed JSON or unexpected data shape
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Invalid caller input
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a path traversal error
    pub fn path_traversal(path: impl Into<PathBuf>) -> Self {
        Error::PathTraversalAttempt { path: path.into() }
    }

    /// Create a document not found error
    pub fn document_not_found(id: impl Into<String>) -> Self {
        Error::DocumentNotFound { id: id.into() }
    }

    /// Create a tweet not found error
    pub fn tweet_not_found(document_id: impl Into<String>, tweet_id: impl Into<String>) -> Self {
        Error::TweetNotFound {
            document_id: document_id.into(),
            tweet_id: tweet_id.into(),
        }
    }

    /// Create a list not found error
    pub fn list_not_found(id: impl Into<String>) -> Self {
        Error::ListNotFound { id: id.into() }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error means "the thing asked for does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::FileNotFound { .. }
                | Error::DocumentNotFound { .. }
                | Error::TweetNotFound { .. }
                | Error::ListNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::parse_error(err.to_string())
    }
}
