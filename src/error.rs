//! Error types for extraction, LLM calls, storage and the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure to turn an uploaded file into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("failed to parse {format} document: {message}")]
    Parse { format: &'static str, message: String },

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single chat-completions call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to LLM API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM response contained no choices")]
    EmptyChoices,
}

/// Failure of a store lookup or update.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),
}

/// Errors surfaced by HTTP handlers as `{"error": ...}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Failed to get a response from the AI: {0}")]
    Upstream(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Extraction(_) | ApiError::Upstream(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
