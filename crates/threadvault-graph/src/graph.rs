//! Link graph over tweets using petgraph

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use threadvault_core::prelude::*;

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// Edge payload: the link as written in the source tweet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEdge {
    pub url: String,
    /// Position within the source tweet's link sequence
    pub position: usize,
}

/// A link whose target is not an existing tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedLink {
    pub source: PathKey,
    pub url: String,
    pub position: usize,
}

/// Directed graph of tweets (nodes) and links (edges)
pub struct LinkGraph {
    graph: DiGraph<PathKey, LinkEdge>,
    index: HashMap<PathKey, NodeIndex>,
    broken: Vec<UnresolvedLink>,
    malformed: Vec<UnresolvedLink>,
}

impl LinkGraph {
    /// Create an empty link graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            broken: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Build the graph for every tweet and link in a dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut graph = Self::new();

        for key in dataset.path_keys() {
            if !graph.index.contains_key(&key) {
                let idx = graph.graph.add_node(key.clone());
                graph.index.insert(key, idx);
            }
        }

        for (document_id, document) in dataset.documents() {
            for tweet in &document.tweets {
                let source = PathKey::new(document_id, tweet.id.clone());
                for (position, link) in tweet.links().iter().enumerate() {
                    graph.add_link(&source, link, position);
                }
            }
        }

        log::debug!(
            "Link graph built: {} tweets, {} resolvable links, {} broken, {} malformed",
            graph.node_count(),
            graph.edge_count(),
            graph.broken.len(),
            graph.malformed.len()
        );

        graph
    }

    fn add_link(&mut self, source: &PathKey, link: &Link, position: usize) {
        let unresolved = || UnresolvedLink {
            source: source.clone(),
            url: link.url.clone(),
            position,
        };

        let Some(target) = link.target() else {
            self.malformed.push(unresolved());
            return;
        };

        match (self.index.get(source), self.index.get(&target)) {
            (Some(&from), Some(&to)) => {
                self.graph.add_edge(
                    from,
                    to,
                    LinkEdge {
                        url: link.url.clone(),
                        position,
                    },
                );
            }
            _ => self.broken.push(unresolved()),
        }
    }

    /// Tweets linking to `key`, sorted and deduplicated
    pub fn backlinks(&self, key: &PathKey) -> Vec<PathKey> {
        self.neighbors(key, Incoming)
    }

    /// Tweets `key` links to, sorted and deduplicated
    pub fn forward_links(&self, key: &PathKey) -> Vec<PathKey> {
        self.neighbors(key, Outgoing)
    }

    fn neighbors(&self, key: &PathKey, direction: Direction) -> Vec<PathKey> {
        let Some(&idx) = self.index.get(key) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tweets that link to themselves
    pub fn self_links(&self) -> Vec<PathKey> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.contains_edge(idx, idx))
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Strongly connected components with more than one tweet
    pub fn cycles(&self) -> Vec<Vec<PathKey>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut keys: Vec<PathKey> = scc.iter().map(|&idx| self.graph[idx].clone()).collect();
                keys.sort();
                keys
            })
            .collect()
    }

    /// Tweets with no incoming and no outgoing resolvable links
    pub fn orphaned_tweets(&self) -> Vec<PathKey> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph.edges_directed(idx, Incoming).next().is_none()
                    && self.graph.edges(idx).next().is_none()
            })
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Links whose target does not exist
    pub fn broken_links(&self) -> &[UnresolvedLink] {
        &self.broken
    }

    /// Links whose url is not `documentId/tweetId`
    pub fn malformed_links(&self) -> &[UnresolvedLink] {
        &self.malformed
    }

    /// Every tweet path-key in the graph
    pub fn all_tweets(&self) -> impl Iterator<Item = &PathKey> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    pub fn contains(&self, key: &PathKey) -> bool {
        self.index.contains_key(key)
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let total_tweets = self.node_count();
        let resolvable_links = self.edge_count();
        let total_links = resolvable_links + self.broken.len() + self.malformed.len();

        GraphStats {
            total_tweets,
            total_links,
            resolvable_links,
            orphaned_tweets: self.orphaned_tweets().len(),
            average_links_per_tweet: if total_tweets > 0 {
                total_links as f64 / total_tweets as f64
            } else {
                0.0
            },
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_tweets: usize,
    pub total_links: usize,
    pub resolvable_links: usize,
    pub orphaned_tweets: usize,
    pub average_links_per_tweet: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::from_value(json!({
            "a": {"tweets": [
                {"id": "1", "links": [{"url": "a/2"}, {"url": "b/1"}, {"url": "b/1"}]},
                {"id": "2", "links": [{"url": "a/1"}]},
                {"id": "3", "links": [{"url": "a/3"}]},
                {"id": "4"}
            ]},
            "b": {"tweets": [
                {"id": "1", "links": [{"url": "missing/1"}, {"url": "not-a-path"}]}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_from_dataset() {
        let graph = LinkGraph::from_dataset(&sample());
        assert_eq!(graph.node_count(), 5);
        // a/1->a/2, a/1->b/1 (x2), a/2->a/1, a/3->a/3
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.broken_links().len(), 1);
        assert_eq!(graph.malformed_links().len(), 1);
        assert_eq!(graph.broken_links()[0].url, "missing/1");
    }

    #[test]
    fn test_backlinks_and_forward_links() {
        let graph = LinkGraph::from_dataset(&sample());
        let forward = graph.forward_links(&PathKey::new("a", "1"));
        assert_eq!(forward, vec![PathKey::new("a", "2"), PathKey::new("b", "1")]);

        let back = graph.backlinks(&PathKey::new("b", "1"));
        assert_eq!(back, vec![PathKey::new("a", "1")]);

        assert!(graph.backlinks(&PathKey::new("zz", "1")).is_empty());
    }

    #[test]
    fn test_cycles_and_self_links() {
        let graph = LinkGraph::from_dataset(&sample());
        assert_eq!(
            graph.cycles(),
            vec![vec![PathKey::new("a", "1"), PathKey::new("a", "2")]]
        );
        assert_eq!(graph.self_links(), vec![PathKey::new("a", "3")]);
    }

    #[test]
    fn test_orphans_and_stats() {
        let graph = LinkGraph::from_dataset(&sample());
        assert_eq!(graph.orphaned_tweets(), vec![PathKey::new("a", "4")]);

        let stats = graph.stats();
        assert_eq!(stats.total_tweets, 5);
        assert_eq!(stats.total_links, 7);
        assert_eq!(stats.resolvable_links, 5);
    }
}
