//! Recursive cross-document link resolution.
//!
//! Starting from one tweet, the resolver copies the tweet's fields, attaches
//! its owning-document summary and, for each outbound link, recursively
//! resolves the target. Cycles are cut per path: a tweet already on the
//! chain from the root resolves to `null`, but the same tweet reached through
//! a sibling branch resolves normally.
//!
//! Because sibling branches are resolved independently, shared targets are
//! resolved once per path that reaches them. Two limits keep that bounded:
//! the depth limit caps nesting, and the node budget caps the number of
//! tweets one top-level call may produce.
//!
//! Missing documents, missing tweets, cycles, malformed targets and both
//! limits all surface the same way to callers: `None` at the top level,
//! `content: null` on a nested link. [`Resolution`] keeps the distinction for
//! callers that want it.

use std::collections::HashSet;
use threadvault_core::prelude::*;
use tracing::instrument;

/// Default maximum nesting of resolved links below the root tweet
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default number of tweets one top-level resolution may produce
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Path-keys visited on the chain from the root call to the current tweet.
///
/// Passed by reference and extended by copy, so sibling branches never see
/// each other's traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorPath {
    keys: HashSet<PathKey>,
}

impl AncestorPath {
    /// Empty path for a top-level call
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is an ancestor on this path
    pub fn contains(&self, key: &PathKey) -> bool {
        self.keys.contains(key)
    }

    /// A copy of this path with `key` appended
    pub fn with(&self, key: PathKey) -> Self {
        let mut keys = self.keys.clone();
        keys.insert(key);
        Self { keys }
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.keys.len()
    }
}

impl FromIterator<PathKey> for AncestorPath {
    fn from_iter<I: IntoIterator<Item = PathKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Outcome of resolving one tweet
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ResolvedTweet),
    DocumentNotFound,
    TweetNotFound,
    CycleDetected,
    DepthExceeded,
    BudgetExhausted,
}

impl Resolution {
    /// Fold every non-`Found` outcome into `None`
    pub fn into_option(self) -> Option<ResolvedTweet> {
        match self {
            Resolution::Found(tweet) => Some(tweet),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Tweets a single top-level call may still resolve
#[derive(Debug)]
struct NodeBudget {
    remaining: usize,
    exhausted: bool,
}

impl NodeBudget {
    fn new(max_nodes: usize) -> Self {
        Self {
            remaining: max_nodes,
            exhausted: false,
        }
    }

    fn take(&mut self) -> bool {
        if self.remaining == 0 {
            self.exhausted = true;
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Resolves tweets and their outbound links against a dataset
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    dataset: &'a Dataset,
    max_depth: usize,
    max_nodes: usize,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver with the default limits
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_max_depth(dataset, DEFAULT_MAX_DEPTH)
    }

    /// Create a resolver that stops descending after `max_depth` levels
    pub fn with_max_depth(dataset: &'a Dataset, max_depth: usize) -> Self {
        Self {
            dataset,
            max_depth: max_depth.max(1),
            max_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Cap the number of tweets one top-level call may resolve
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Resolve a tweet from a fresh path.
    ///
    /// Returns `None` when the document or tweet does not exist.
    #[instrument(skip(self), level = "debug", name = "resolve_tweet")]
    pub fn resolve(&self, document_id: &str, tweet_id: &str) -> Option<ResolvedTweet> {
        self.resolve_with_path(document_id, tweet_id, &AncestorPath::new())
    }

    /// Resolve a tweet given the keys already visited on the current path
    pub fn resolve_with_path(
        &self,
        document_id: &str,
        tweet_id: &str,
        visited: &AncestorPath,
    ) -> Option<ResolvedTweet> {
        self.lookup(document_id, tweet_id, visited).into_option()
    }

    /// Resolve a tweet, keeping the reason when nothing was found.
    ///
    /// Each call starts a fresh node budget.
    pub fn lookup(&self, document_id: &str, tweet_id: &str, visited: &AncestorPath) -> Resolution {
        let mut budget = NodeBudget::new(self.max_nodes);
        let resolution = self.lookup_within(document_id, tweet_id, visited, &mut budget);
        if budget.exhausted {
            log::warn!(
                "Node budget of {} tweets exhausted resolving '{}/{}'",
                self.max_nodes,
                document_id,
                tweet_id
            );
        }
        resolution
    }

    fn lookup_within(
        &self,
        document_id: &str,
        tweet_id: &str,
        visited: &AncestorPath,
        budget: &mut NodeBudget,
    ) -> Resolution {
        let Some(document) = self.dataset.document(document_id) else {
            return Resolution::DocumentNotFound;
        };
        let Some(tweet) = document.tweet(tweet_id) else {
            return Resolution::TweetNotFound;
        };

        let key = PathKey::new(document_id, tweet_id);
        if visited.contains(&key) {
            return Resolution::CycleDetected;
        }
        if visited.depth() >= self.max_depth {
            return Resolution::DepthExceeded;
        }
        if !budget.take() {
            return Resolution::BudgetExhausted;
        }
        let path = visited.with(key);

        let links = tweet.has_links().then(|| {
            tweet
                .links()
                .iter()
                .map(|link| self.resolve_link(link, &path, budget))
                .collect()
        });

        Resolution::Found(ResolvedTweet {
            id: tweet.id.clone(),
            fields: tweet.fields.clone(),
            document: document.summary(),
            links,
        })
    }

    fn resolve_link(
        &self,
        link: &Link,
        path: &AncestorPath,
        budget: &mut NodeBudget,
    ) -> ResolvedLink {
        let content = match link.target() {
            Some(target) => {
                match self.lookup_within(&target.document_id, &target.tweet_id, path, budget) {
                    Resolution::Found(resolved) => Some(Box::new(resolved)),
                    Resolution::DepthExceeded => {
                        log::warn!(
                            "Link depth limit {} reached at '{}'",
                            self.max_depth,
                            link.url
                        );
                        None
                    }
                    other => {
                        log::trace!("Link '{}' left unresolved: {:?}", link.url, other);
                        None
                    }
                }
            }
            None => {
                log::debug!("Malformed link target '{}'", link.url);
                None
            }
        };

        ResolvedLink {
            url: link.url.clone(),
            fields: link.fields.clone(),
            content,
        }
    }
}
