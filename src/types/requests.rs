//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use super::ChatMessage;

/// Result of processing one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub session_id: String,
    pub summary: String,
    /// Number of chunks the text was split into
    pub chunk_count: usize,
}

/// Response for `POST /summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub session_id: String,
}

impl From<UploadOutcome> for SummarizeResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            summary: outcome.summary,
            session_id: outcome.session_id,
        }
    }
}

/// Request for `POST /chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response for `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response for `GET /chat/history/:session_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub session_id: String,
    pub document_title: String,
    pub history: Vec<ChatMessage>,
}
