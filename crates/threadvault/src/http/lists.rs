use crate::AppState;
use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde::Deserialize;
use std::sync::Arc;
use threadvault_core::PathKey;
use threadvault_store::{Comment, CuratedList};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/lists", get(all_lists).post(create_list))
        .route("/api/lists/{list_id}", get(get_list).delete(delete_list))
        .route(
            "/api/lists/{list_id}/items",
            post(add_item).delete(remove_item),
        )
        .route(
            "/api/lists/{list_id}/comments/{document_id}/{tweet_id}",
            get(load_comments).put(save_comments).post(add_comment),
        )
}

#[derive(Deserialize)]
struct CreateList {
    name: String,
}

#[derive(Deserialize)]
struct ItemRequest {
    path: String,
}

#[derive(Deserialize)]
struct NewComment {
    content: String,
}

async fn all_lists(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CuratedList>>> {
    Ok(Json(state.store.lists().await?))
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateList>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CuratedList>)> {
    let Json(request) = payload?;
    let list = state.store.create_list(&request.name).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> ApiResult<Json<CuratedList>> {
    Ok(Json(state.store.get_list(&list_id).await?))
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete_list(&list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Only tweets present in the bundled dataset can be added
async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> ApiResult<Json<CuratedList>> {
    let Json(request) = payload?;
    let key: PathKey = request.path.parse()?;
    if !state.dataset.contains(&key) {
        return Err(ApiError::not_found("Tweet not found"));
    }
    Ok(Json(state.store.add_to_list(&list_id, &request.path).await?))
}

async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> ApiResult<Json<CuratedList>> {
    let Json(request) = payload?;
    Ok(Json(
        state.store.remove_from_list(&list_id, &request.path).await?,
    ))
}

async fn load_comments(
    State(state): State<Arc<AppState>>,
    Path((list_id, document_id, tweet_id)): Path<(String, String, String)>,
) -> Json<Vec<Comment>> {
    let tweet_path = PathKey::new(document_id, tweet_id).to_string();
    Json(state.store.load_tweet_comments(&list_id, &tweet_path).await)
}

async fn save_comments(
    State(state): State<Arc<AppState>>,
    Path((list_id, document_id, tweet_id)): Path<(String, String, String)>,
    payload: Result<Json<Vec<Comment>>, JsonRejection>,
) -> ApiResult<Json<Vec<Comment>>> {
    let Json(comments) = payload?;
    let tweet_path = PathKey::new(document_id, tweet_id).to_string();
    if !state
        .store
        .save_tweet_comments(&list_id, &tweet_path, comments.clone())
        .await
    {
        return Err(ApiError::not_found("List not found"));
    }
    Ok(Json(comments))
}

async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path((list_id, document_id, tweet_id)): Path<(String, String, String)>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let Json(request) = payload?;
    let tweet_path = PathKey::new(document_id, tweet_id).to_string();
    let comment = state
        .store
        .add_comment(&list_id, &tweet_path, &request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
