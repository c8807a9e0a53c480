use crate::AppState;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(api_health))
}

/// Link health computed once at startup
async fn api_health(State(state): State<Arc<AppState>>) -> Response {
    Json(&state.health).into_response()
}
