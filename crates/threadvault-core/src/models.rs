//! Data models for the bundled document dataset.
//!
//! These types are designed to be:
//! - **Lossless**: tweets and links keep their whole source object, in
//!   source order, and write it back unchanged
//! - **Serializable**: everything serializes back to the `documents.json` shape
//! - **Read-only after load**: nothing here mutates once a dataset is built
//!
//! Field names on the wire are camelCase (`displayName`, `accountId`) to
//! match `documents.json`.

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Arbitrary JSON fields carried alongside the typed ones
pub type Fields = Map<String, Value>;

/// Address of a tweet: `"<documentId>/<tweetId>"`.
///
/// Also used as the cycle-detection unit of the link resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PathKey {
    pub document_id: String,
    pub tweet_id: String,
}

impl PathKey {
    /// Create a path-key from its two components
    pub fn new(document_id: impl Into<String>, tweet_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            tweet_id: tweet_id.into(),
        }
    }

    /// Parse a link target.
    ///
    /// Returns `None` unless the target splits on `/` into exactly two
    /// non-empty components. Extra segments are not folded into the tweet id.
    pub fn parse(target: &str) -> Option<Self> {
        let mut parts = target.split('/');
        let document_id = parts.next()?;
        let tweet_id = parts.next()?;
        if parts.next().is_some() || document_id.is_empty() || tweet_id.is_empty() {
            return None;
        }
        Some(Self::new(document_id, tweet_id))
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.document_id, self.tweet_id)
    }
}

impl FromStr for PathKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::validation_error(format!(
                "'{}' is not a <documentId>/<tweetId> path",
                s
            ))
        })
    }
}

impl From<PathKey> for String {
    fn from(key: PathKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for PathKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// An outbound reference from a tweet.
///
/// `fields` holds the whole source object in source order, `url` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct Link {
    /// Target address, expected to be `documentId/tweetId`
    pub url: String,
    pub fields: Fields,
}

impl Link {
    /// Parsed target, or `None` when the url is malformed
    pub fn target(&self) -> Option<PathKey> {
        PathKey::parse(&self.url)
    }
}

impl TryFrom<Fields> for Link {
    type Error = Error;

    fn try_from(fields: Fields) -> Result<Self> {
        let url = match fields.get("url") {
            Some(Value::String(url)) => url.clone(),
            Some(other) => {
                return Err(Error::parse_error(format!(
                    "link url must be a string, found {}",
                    other
                )));
            }
            None => return Err(Error::parse_error("link is missing its url")),
        };
        Ok(Self { url, fields })
    }
}

impl From<Link> for Fields {
    fn from(link: Link) -> Self {
        link.fields
    }
}

/// A single content unit within a document.
///
/// `fields` holds the whole source object in source order. `id` and `links`
/// are parsed views of two of its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Fields", into = "Fields")]
pub struct Tweet {
    /// Lookup key, unique within the owning document. A numeric `id` is
    /// addressed by its decimal string form; `fields` keeps the number.
    pub id: String,

    /// `None` when the source has no `links` or `links: null`
    pub links: Option<Vec<Link>>,

    pub fields: Fields,
}

impl Tweet {
    /// Outbound links, empty when the tweet has none
    pub fn links(&self) -> &[Link] {
        self.links.as_deref().unwrap_or(&[])
    }

    /// Whether the tweet carries at least one link
    pub fn has_links(&self) -> bool {
        !self.links().is_empty()
    }

    /// Text content, if present and a string
    pub fn text(&self) -> Option<&str> {
        self.fields.get("text").and_then(Value::as_str)
    }
}

impl TryFrom<Fields> for Tweet {
    type Error = Error;

    fn try_from(fields: Fields) -> Result<Self> {
        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::parse_error(format!(
                    "tweet id must be a string or number, found {}",
                    other
                )));
            }
            None => return Err(Error::parse_error("tweet is missing its id")),
        };

        let links = match fields.get("links") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value::<Vec<Link>>(value.clone()).map_err(|e| {
                    Error::parse_error(format!("invalid links of tweet '{}': {}", id, e))
                })?,
            ),
        };

        Ok(Self { id, links, fields })
    }
}

impl From<Tweet> for Fields {
    fn from(tweet: Tweet) -> Self {
        tweet.fields
    }
}

/// A named, ordered collection of tweets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    pub tweets: Vec<Tweet>,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Find a tweet by id (first match in document order)
    pub fn tweet(&self, id: &str) -> Option<&Tweet> {
        self.tweets.iter().find(|t| t.id == id)
    }

    /// Summary attached to every resolved tweet
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            display_name: self.display_name.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

/// Owning-document summary attached to a resolved tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// Read model produced by the link resolver.
///
/// Serializes as the source tweet's fields in source order with `document`
/// set to the summary and `links` replaced in place by the resolved links.
/// `document` is appended when the source has none. `links` is absent (not
/// empty) when the source tweet has no links.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTweet {
    /// Lookup key of the source tweet
    pub id: String,
    pub fields: Fields,
    pub document: DocumentSummary,
    pub links: Option<Vec<ResolvedLink>>,
}

impl Serialize for ResolvedTweet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            match key.as_str() {
                "document" => map.serialize_entry(key, &self.document)?,
                "links" => {
                    if let Some(links) = &self.links {
                        map.serialize_entry(key, links)?;
                    }
                }
                _ => map.serialize_entry(key, value)?,
            }
        }
        if !self.fields.contains_key("document") {
            map.serialize_entry("document", &self.document)?;
        }
        if let Some(links) = &self.links
            && !self.fields.contains_key("links")
        {
            map.serialize_entry("links", links)?;
        }
        map.end()
    }
}

/// A link annotated with the resolved content of its target.
///
/// `content` is `null` when the target is missing, malformed, cyclic on the
/// current path, beyond the depth limit, or past the node budget. The link
/// itself is always kept, with its fields in source order and `content`
/// appended or replaced in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    pub url: String,
    pub fields: Fields,
    pub content: Option<Box<ResolvedTweet>>,
}

impl Serialize for ResolvedLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            if key == "content" {
                map.serialize_entry(key, &self.content)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        if !self.fields.contains_key("content") {
            map.serialize_entry("content", &self.content)?;
        }
        map.end()
    }
}
