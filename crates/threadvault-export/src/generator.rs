//! Static site generation

use crate::pages::{render_document, render_index, render_tweet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use threadvault_core::prelude::*;
use threadvault_core::PathValidator;
use threadvault_graph::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, LinkResolver};
use tracing::instrument;

/// What a generation run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub documents: usize,
    pub tweets: usize,
    pub files_written: usize,
    pub stylesheet_copied: bool,
    /// Pages not written because their id is not a safe file name
    pub skipped: Vec<String>,
}

/// Writes one HTML page per document and per tweet under an output
/// directory:
///
/// ```text
/// <out>/index.html
/// <out>/main.css                     (copied from <out>/styles/main.css)
/// <out>/document/<id>/index.html
/// <out>/document/<id>/<tweetId>.html
/// ```
pub struct StaticSiteGenerator<'a> {
    dataset: &'a Dataset,
    output_dir: PathBuf,
    stylesheet: Option<PathBuf>,
    max_link_depth: usize,
    max_link_nodes: usize,
}

impl<'a> StaticSiteGenerator<'a> {
    pub fn new(dataset: &'a Dataset, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let stylesheet = Some(output_dir.join("styles").join("main.css"));
        Self {
            dataset,
            output_dir,
            stylesheet,
            max_link_depth: DEFAULT_MAX_DEPTH,
            max_link_nodes: DEFAULT_MAX_NODES,
        }
    }

    /// Source stylesheet copied to `<out>/main.css`, `None` to skip
    pub fn with_stylesheet(mut self, stylesheet: Option<PathBuf>) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_max_link_depth(mut self, depth: usize) -> Self {
        self.max_link_depth = depth;
        self
    }

    pub fn with_max_link_nodes(mut self, nodes: usize) -> Self {
        self.max_link_nodes = nodes;
        self
    }

    #[instrument(skip(self), fields(output = ?self.output_dir), name = "export_generate")]
    pub fn generate(&self) -> Result<ExportSummary> {
        let mut summary = ExportSummary {
            output_dir: self.output_dir.clone(),
            ..Default::default()
        };
        fs::create_dir_all(&self.output_dir).map_err(Error::io)?;

        summary.stylesheet_copied = self.copy_stylesheet()?;

        self.write_page(&self.output_dir.join("index.html"), &render_index(self.dataset))?;
        summary.files_written += 1;

        let resolver = LinkResolver::with_max_depth(self.dataset, self.max_link_depth)
            .with_max_nodes(self.max_link_nodes);

        for (document_id, document) in self.dataset.documents() {
            let document_dir = match PathValidator::validate_path_in_root(
                &self.output_dir,
                &Path::new("document").join(document_id),
            ) {
                Ok(dir) => dir,
                Err(e) => {
                    log::warn!("Skipping document '{}': {}", document_id, e);
                    summary.skipped.push(document_id.to_string());
                    continue;
                }
            };
            fs::create_dir_all(&document_dir).map_err(Error::io)?;

            self.write_page(
                &document_dir.join("index.html"),
                &render_document(document_id, document),
            )?;
            summary.files_written += 1;
            summary.documents += 1;

            for tweet in &document.tweets {
                let key = PathKey::new(document_id, tweet.id.clone());
                let Some(page) = Self::tweet_file(&document_dir, &tweet.id) else {
                    log::warn!("Skipping tweet '{}': unsafe file name", key);
                    summary.skipped.push(key.to_string());
                    continue;
                };
                let Some(resolved) = resolver.resolve(document_id, &tweet.id) else {
                    summary.skipped.push(key.to_string());
                    continue;
                };

                let current_url = format!("/document/{}/{}", document_id, tweet.id);
                let back_url = format!("/document/{}", document_id);
                self.write_page(&page, &render_tweet(&resolved, &current_url, &back_url))?;
                summary.files_written += 1;
                summary.tweets += 1;
            }
        }

        log::info!(
            "Static files generated: {} documents, {} tweets, {} files in {}",
            summary.documents,
            summary.tweets,
            summary.files_written,
            self.output_dir.display()
        );
        Ok(summary)
    }

    fn tweet_file(document_dir: &Path, tweet_id: &str) -> Option<PathBuf> {
        if tweet_id.is_empty() || tweet_id.contains(['/', '\\']) {
            return None;
        }
        PathValidator::validate_path_in_root(document_dir, Path::new(&format!("{}.html", tweet_id)))
            .ok()
    }

    fn copy_stylesheet(&self) -> Result<bool> {
        let Some(source) = &self.stylesheet else {
            return Ok(false);
        };
        if !source.is_file() {
            log::debug!("No stylesheet at {}", source.display());
            return Ok(false);
        }
        fs::copy(source, self.output_dir.join("main.css")).map_err(Error::io)?;
        Ok(true)
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        fs::write(path, html).map_err(Error::io)
    }
}
