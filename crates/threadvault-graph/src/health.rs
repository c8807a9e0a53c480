//! Dataset link health analysis.
//!
//! Reports links that the resolver will never be able to follow (missing
//! targets, malformed urls) along with structural oddities such as
//! self-links and link cycles. None of these are errors: the resolver
//! handles all of them by returning `content: null`.

use crate::graph::{LinkGraph, UnresolvedLink};
use serde::{Deserialize, Serialize};
use threadvault_core::prelude::*;

/// Minimum normalized Levenshtein similarity for a suggestion
const SUGGESTION_THRESHOLD: f64 = 0.6;
const MAX_SUGGESTIONS: usize = 3;

/// A link to a tweet that does not exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenLink {
    /// Tweet containing the link
    pub source: PathKey,
    /// The url as written
    pub target: String,
    /// Position within the source tweet's links
    pub position: usize,
    /// Closest existing path-keys
    pub suggestions: Vec<String>,
}

/// Health analysis report for the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub total_documents: usize,
    pub total_tweets: usize,
    pub total_links: usize,
    pub broken_links: Vec<BrokenLink>,
    pub malformed_links: Vec<UnresolvedLink>,
    pub self_links: Vec<PathKey>,
    pub cycles: Vec<Vec<PathKey>>,
    pub orphaned_tweets: usize,
    /// Overall health score (0-100)
    pub health_score: u8,
}

impl HealthReport {
    /// Create a new empty health report
    pub fn new() -> Self {
        Self {
            total_documents: 0,
            total_tweets: 0,
            total_links: 0,
            broken_links: Vec::new(),
            malformed_links: Vec::new(),
            self_links: Vec::new(),
            cycles: Vec::new(),
            orphaned_tweets: 0,
            health_score: 100,
        }
    }

    /// Calculate health score based on issues
    pub fn calculate_score(&mut self) {
        if self.total_tweets == 0 {
            self.health_score = 0;
            return;
        }
        if self.total_links == 0 {
            self.health_score = 100;
            return;
        }

        let links = self.total_links as f32;
        let mut score = 100.0_f32;

        // Broken links cost up to 60 points, malformed ones up to 40
        score -= self.broken_links.len() as f32 / links * 60.0;
        score -= self.malformed_links.len() as f32 / links * 40.0;

        self.health_score = score.clamp(0.0, 100.0).round() as u8;
    }

    /// Check if the dataset is healthy (score >= 80)
    pub fn is_healthy(&self) -> bool {
        self.health_score >= 80
    }

    /// Number of links the resolver cannot follow
    pub fn unresolvable_count(&self) -> usize {
        self.broken_links.len() + self.malformed_links.len()
    }
}

impl Default for HealthReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Dataset health analyzer
pub struct HealthAnalyzer<'a> {
    dataset: &'a Dataset,
    graph: &'a LinkGraph,
}

impl<'a> HealthAnalyzer<'a> {
    /// Create a new health analyzer
    pub fn new(dataset: &'a Dataset, graph: &'a LinkGraph) -> Self {
        Self { dataset, graph }
    }

    /// Run a full health analysis
    pub fn analyze(&self) -> HealthReport {
        let stats = self.graph.stats();
        let mut report = HealthReport::new();

        report.total_documents = self.dataset.len();
        report.total_tweets = stats.total_tweets;
        report.total_links = stats.total_links;
        report.orphaned_tweets = stats.orphaned_tweets;

        report.broken_links = self
            .graph
            .broken_links()
            .iter()
            .map(|link| BrokenLink {
                source: link.source.clone(),
                target: link.url.clone(),
                position: link.position,
                suggestions: self.suggest_targets(&link.url),
            })
            .collect();
        report.malformed_links = self.graph.malformed_links().to_vec();
        report.self_links = self.graph.self_links();
        report.cycles = self.graph.cycles();

        report.calculate_score();
        report
    }

    /// Suggest existing path-keys close to a broken target
    pub fn suggest_targets(&self, target: &str) -> Vec<String> {
        let mut scored: Vec<(f64, String)> = self
            .graph
            .all_tweets()
            .map(|key| {
                let candidate = key.to_string();
                (strsim::normalized_levenshtein(target, &candidate), candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        scored.truncate(MAX_SUGGESTIONS);
        scored.into_iter().map(|(_, key)| key).collect()
    }
}
