use crate::AppState;
use crate::error::ApiResult;
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use threadvault_diff::{RenderedDifference, format_text_diff, render_differences};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diff/text", post(text_diff))
        .route("/api/diff/values", post(value_diff))
}

#[derive(Deserialize)]
struct TextDiffRequest {
    #[serde(default)]
    before: String,
    #[serde(default)]
    after: String,
}

#[derive(Serialize)]
struct TextDiffResponse {
    html: String,
}

async fn text_diff(
    payload: Result<Json<TextDiffRequest>, JsonRejection>,
) -> ApiResult<Json<TextDiffResponse>> {
    let Json(request) = payload?;
    Ok(Json(TextDiffResponse {
        html: format_text_diff(&request.before, &request.after),
    }))
}

#[derive(Deserialize)]
struct ValueDiffRequest {
    #[serde(default)]
    bundled: Value,
    #[serde(default)]
    local: Value,
}

async fn value_diff(
    payload: Result<Json<ValueDiffRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<RenderedDifference>>> {
    let Json(request) = payload?;
    Ok(Json(render_differences(&request.bundled, &request.local)))
}
