//! # threadvault
//!
//! HTTP API over a bundled dataset of threaded documents. Tweets are served
//! with their cross-document links resolved recursively; curated lists,
//! comments and document revisions are kept in a local JSON store.
//!
//! ## API
//!
//! - `GET /api/documents` - the whole dataset
//! - `GET /api/document/{documentId}` - one document
//! - `GET /api/document/{documentId}/{tweetId}` - one tweet, links resolved
//! - `GET /api/health` - link health report
//! - `/api/lists/...` - curated lists and tweet comments
//! - `/api/revisions/...` - local document revisions and their diffs
//! - `POST /api/diff/text` - character diff rendered as HTML
//!
//! Anything else is served from the static directory, falling back to the
//! single-page client.

pub mod error;
pub mod http;
pub mod logging;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, Method, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::sync::Arc;
use threadvault_core::prelude::*;
use threadvault_graph::{HealthAnalyzer, HealthReport, LinkGraph, LinkResolver};
use threadvault_store::LocalStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: ServerConfig,
    pub dataset: Arc<Dataset>,
    pub store: LocalStore,
    pub health: HealthReport,
}

impl AppState {
    pub fn new(config: ServerConfig, dataset: Dataset) -> Self {
        let graph = LinkGraph::from_dataset(&dataset);
        let health = HealthAnalyzer::new(&dataset, &graph).analyze();
        let store = LocalStore::new(config.store_path.clone());

        Self {
            config,
            dataset: Arc::new(dataset),
            store,
            health,
        }
    }

    /// Load the dataset named by `config`
    pub async fn load(config: ServerConfig) -> Result<Self> {
        let dataset = Dataset::load_async(&config.data_path).await?;
        Ok(Self::new(config, dataset))
    }

    /// Resolver bound to the dataset and configured limits
    pub fn resolver(&self) -> LinkResolver<'_> {
        LinkResolver::with_max_depth(&self.dataset, self.config.max_link_depth)
            .with_max_nodes(self.config.max_link_nodes)
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    log::info!("Request received: {} {}", request.method(), request.uri());
    next.run(request).await
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    log::error!("Handler panicked: {}", detail);
    ApiError::internal().into_response()
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir)
        .fallback(ServeFile::new(&state.config.spa_index));
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        .merge(http::documents::router())
        .merge(http::health::router())
        .merge(http::lists::router())
        .merge(http::revisions::router())
        .merge(http::diff::router())
        .fallback_service(static_files)
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http());

    let router = if cors_enabled {
        router.layer(cors_layer())
    } else {
        router
    };

    router.layer(CatchPanicLayer::custom(panic_response))
}

/// Log a one-line link health summary, with detail for each problem
pub fn log_health_summary(report: &HealthReport) {
    log::info!(
        "Link health: score {} | {} documents, {} tweets, {} links | {} broken, {} malformed, {} cycles",
        report.health_score,
        report.total_documents,
        report.total_tweets,
        report.total_links,
        report.broken_links.len(),
        report.malformed_links.len(),
        report.cycles.len()
    );
    for broken in &report.broken_links {
        if broken.suggestions.is_empty() {
            log::warn!("Broken link {} -> {}", broken.source, broken.target);
        } else {
            log::warn!(
                "Broken link {} -> {} (did you mean {}?)",
                broken.source,
                broken.target,
                broken.suggestions.join(", ")
            );
        }
    }
    for malformed in &report.malformed_links {
        log::warn!("Malformed link {} -> '{}'", malformed.source, malformed.url);
    }
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let address = state.config.socket_address();
    if state.config.health_on_startup {
        log_health_summary(&state.health);
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(Error::io)?;
    log::info!("App listening at http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::io)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"error": "Something broke!"}));
    }
}
