//! Mapping of errors to HTTP responses

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use threadvault_core::Error;

/// Body for failures the client cannot act on
pub const INTERNAL_ERROR_MESSAGE: &str = "Something broke!";

/// Error returned by API handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::DocumentNotFound { .. } => Self::not_found("Document not found"),
            Error::TweetNotFound { .. } => Self::not_found("Tweet not found"),
            Error::ListNotFound { .. } => Self::not_found("List not found"),
            Error::ValidationError { reason } => Self::bad_request(reason),
            other => {
                log::error!("Request failed: {}", other);
                Self::internal()
            }
        }
    }
}

/// Unreadable request bodies keep axum's status but answer in the API's
/// error shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
