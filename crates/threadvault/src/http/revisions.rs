use crate::AppState;
use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use threadvault_diff::{RenderedDifference, render_differences};
use threadvault_store::{Revision, document_hash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/revisions/{document_id}",
            get(get_revision).put(save_revision).delete(delete_revision),
        )
        .route("/api/revisions/{document_id}/diff", get(revision_diff))
}

#[derive(Deserialize)]
struct SaveRevision {
    document: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RevisionDiff {
    document_id: String,
    saved_at: String,
    /// Bundled document changed after the revision was saved
    stale: bool,
    differences: Vec<RenderedDifference>,
}

fn bundled<'a>(state: &'a AppState, document_id: &str) -> ApiResult<&'a Value> {
    state
        .dataset
        .raw_document(document_id)
        .ok_or_else(|| ApiError::not_found("Document not found"))
}

async fn find_revision(state: &AppState, document_id: &str) -> ApiResult<Revision> {
    state
        .store
        .get_revision(document_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Revision not found"))
}

async fn get_revision(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<Revision>> {
    Ok(Json(find_revision(&state, &document_id).await?))
}

async fn save_revision(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
    payload: Result<Json<SaveRevision>, JsonRejection>,
) -> ApiResult<Json<Revision>> {
    let Json(request) = payload?;
    if !request.document.is_object() {
        return Err(ApiError::bad_request("Revision document must be a JSON object"));
    }
    let base_hash = document_hash(bundled(&state, &document_id)?);
    let revision = state
        .store
        .save_revision(&document_id, request.document, &base_hash)
        .await?;
    log::info!("Saved revision of '{}'", document_id);
    Ok(Json(revision))
}

async fn delete_revision(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete_revision(&document_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Revision not found"))
    }
}

/// Differences between the bundled document and its local revision
async fn revision_diff(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<RevisionDiff>> {
    let bundled = bundled(&state, &document_id)?;
    let revision = find_revision(&state, &document_id).await?;

    Ok(Json(RevisionDiff {
        stale: revision.is_stale(bundled),
        differences: render_differences(bundled, &revision.document),
        document_id,
        saved_at: revision.saved_at,
    }))
}
