use crate::AppState;
use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use threadvault_core::ResolvedTweet;
use tracing::instrument;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/documents", get(list_documents))
        .route("/api/document/{document_id}", get(get_document))
        .route("/api/document/{document_id}/{tweet_id}", get(get_tweet))
}

async fn list_documents(State(state): State<Arc<AppState>>) -> Response {
    Json(state.dataset.as_value()).into_response()
}

async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> ApiResult<Response> {
    let document = state
        .dataset
        .raw_document(&document_id)
        .ok_or_else(|| ApiError::not_found("Document not found"))?;
    Ok(Json(document).into_response())
}

/// The tweet with every outbound link resolved recursively.
///
/// Resolution runs on the blocking pool.
#[instrument(skip(state), name = "get_tweet")]
async fn get_tweet(
    State(state): State<Arc<AppState>>,
    Path((document_id, tweet_id)): Path<(String, String)>,
) -> ApiResult<Json<ResolvedTweet>> {
    if state.dataset.document(&document_id).is_none() {
        return Err(ApiError::not_found("Document not found"));
    }
    let resolved = tokio::task::spawn_blocking(move || {
        state.resolver().resolve(&document_id, &tweet_id)
    })
    .await
    .map_err(|e| {
        log::error!("Tweet resolution task failed: {}", e);
        ApiError::internal()
    })?;

    resolved
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Tweet not found"))
}
