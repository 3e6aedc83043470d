//! HTTP request handlers for the summarization service.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::chat::ChatService;
use crate::chunkers::WordChunker;
use crate::error::{ApiError, LlmError};
use crate::extract::FileExtractor;
use crate::llm::{LlmApi, OpenRouterClient};
use crate::pipeline::{Upload, UploadPipeline};
use crate::store::{DocumentStore, InMemoryStore};
use crate::summary::{SummaryAssembler, SummaryClient};
use crate::types::{
    ChatHistoryResponse, ChatRequest, ChatResponse, DocumentListing, ServiceConfig,
    SummarizeResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: UploadPipeline,
    pub chat: ChatService,
    pub store: Arc<dyn DocumentStore>,
    pub config: ServiceConfig,
}

impl AppState {
    /// Wire the production components from configuration.
    pub fn from_config(config: ServiceConfig) -> Result<Self, LlmError> {
        let llm: Arc<dyn LlmApi> = Arc::new(OpenRouterClient::new(config.llm.clone())?);
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());

        let summary_client = SummaryClient::new(Arc::clone(&llm), config.summary.clone());
        let assembler = SummaryAssembler::new(
            Arc::new(WordChunker::new()),
            Arc::new(summary_client),
            config.summary.concurrency,
        );
        let pipeline = UploadPipeline::new(
            Arc::new(FileExtractor::new()),
            Arc::new(assembler),
            Arc::clone(&store),
            config.summary.max_chars,
        );
        let chat = ChatService::new(llm, Arc::clone(&store), &config.chat_model);

        Ok(Self {
            pipeline,
            chat,
            store,
            config,
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    ApiError::BadRequest(e.to_string())
}

/// Upload a PDF or DOCX, summarize it and open a chat session.
pub async fn summarize_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let mut user_id: Option<String> = None;
    let mut time: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => user_id = Some(field.text().await.map_err(bad_request)?),
            "time" => time = Some(field.text().await.map_err(bad_request)?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(bad_request)?;
                file = Some((file_name, data.to_vec()));
            }
            _ => {}
        }
    }

    let user_id = user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| bad_request("User ID is required"))?;
    let (file_name, data) = file.ok_or_else(|| bad_request("No file part in the request"))?;
    if file_name.is_empty() {
        return Err(bad_request("No selected file"));
    }

    info!(user_id = %user_id, file = %file_name, bytes = data.len(), "Received upload");

    let path = save_upload(&state.config.upload_dir, &file_name, &data).await?;
    let outcome = state
        .pipeline
        .process_upload(Upload {
            user_id,
            title: file_name,
            time,
            path,
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// Write the upload under a unique name, keeping its extension.
async fn save_upload(dir: &str, file_name: &str, data: &[u8]) -> Result<PathBuf, ApiError> {
    let base = FsPath::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let path = FsPath::new(dir).join(format!("{}-{}", Uuid::new_v4(), base));

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to create upload dir: {}", e)))?;
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to save upload: {}", e)))?;

    Ok(path)
}

/// Ask a question about an uploaded document.
pub async fn chat_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request.session_id.filter(|s| !s.is_empty());
    let message = request.message.filter(|m| !m.is_empty());

    let (Some(session_id), Some(message)) = (session_id, message) else {
        return Err(bad_request("Missing session_id or message"));
    };

    let response = state.chat.chat(&session_id, &message).await?;
    Ok(Json(ChatResponse { response }))
}

/// List a user's documents, newest first.
pub async fn get_documents(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<DocumentListing>> {
    let documents = state.store.list_documents(&user_id).await;
    Json(documents.iter().map(|d| d.to_listing()).collect())
}

/// Get the chat transcript of a session.
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    Ok(Json(state.chat.history(&session_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use crate::error::ExtractionError;
    use crate::extract::TextExtractor;
    use crate::llm::{CompletionRequest, CompletionResponse};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Summaries echo a fixed sentence; chat replies with a fixed answer.
    struct CannedLlm;

    #[async_trait]
    impl LlmApi for CannedLlm {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if request.top_p.is_some() {
                Ok(CompletionResponse::with_content("<s>The lessee must pay rent.</s>"))
            } else {
                Ok(CompletionResponse::with_content("Rent is monthly."))
            }
        }
    }

    struct StubExtractor;

    impl TextExtractor for StubExtractor {
        fn extract_text(&self, path: &FsPath) -> Result<String, ExtractionError> {
            match path.extension().and_then(|e| e.to_str()) {
                Some("pdf") => Ok("The lessee  shall pay\nrent .".to_string()),
                _ => Err(ExtractionError::UnsupportedFormat(path.display().to_string())),
            }
        }
    }

    fn test_state(upload_dir: &FsPath) -> Arc<AppState> {
        let config = ServiceConfig {
            upload_dir: upload_dir.display().to_string(),
            ..ServiceConfig::default()
        };
        let llm: Arc<dyn LlmApi> = Arc::new(CannedLlm);
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
        let assembler = SummaryAssembler::new(
            Arc::new(WordChunker::new()),
            Arc::new(SummaryClient::new(Arc::clone(&llm), config.summary.clone())),
            1,
        );
        let pipeline = UploadPipeline::new(
            Arc::new(StubExtractor),
            Arc::new(assembler),
            Arc::clone(&store),
            config.summary.max_chars,
        );
        let chat = ChatService::new(llm, Arc::clone(&store), &config.chat_model);
        Arc::new(AppState {
            pipeline,
            chat,
            store,
            config,
        })
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let boundary = "legalease-boundary";
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{}\r\n", boundary));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", boundary));

        Request::builder()
            .method("POST")
            .uri("/summarize")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(Arc::clone(state)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(&test_state(dir.path()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_upload_chat_and_listing_flow() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (status, body) = send(
            &state,
            multipart_request(&[
                ("user_id", None, "alice"),
                ("time", None, "2024-05-01T09:30:00Z"),
                ("file", Some("lease.pdf"), "%PDF-1.5 fake"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {}", body);
        assert_eq!(body["summary"], "The lessee must pay rent.");
        let session_id = body["session_id"].as_str().unwrap().to_string();

        // Upload was cleaned up after processing
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let (status, body) = send(
            &state,
            json_request(
                "POST",
                "/chat",
                json!({"session_id": session_id, "message": "When is rent due?"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Rent is monthly.");

        let (status, body) = send(&state, get("/documents/alice")).await;
        assert_eq!(status, StatusCode::OK);
        let listing = &body[0];
        assert_eq!(listing["title"], "lease.pdf");
        assert_eq!(listing["time"], "2024-05-01T09:30:00Z");
        assert_eq!(listing["icon"], "fas fa-file-alt");
        assert_eq!(listing["has_chat"], true);
        assert_eq!(listing["summary"], "The lessee must pay rent.");

        let (status, body) = send(&state, get(&format!("/chat/history/{}", session_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_title"], "lease.pdf");
        assert_eq!(
            body["history"],
            json!([
                {"role": "user", "content": "When is rent due?"},
                {"role": "assistant", "content": "Rent is monthly."}
            ])
        );
    }

    #[tokio::test]
    async fn test_upload_validation() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (status, body) = send(
            &state,
            multipart_request(&[("file", Some("lease.pdf"), "x")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");

        let (status, body) = send(&state, multipart_request(&[("user_id", None, "alice")])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file part in the request");

        let (status, body) = send(
            &state,
            multipart_request(&[("user_id", None, "alice"), ("file", Some(""), "x")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (status, body) = send(
            &state,
            multipart_request(&[("user_id", None, "alice"), ("file", Some("notes.txt"), "x")]),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Unsupported file format. Please upload PDF or DOCX."
        );
        assert!(state.store.list_documents("alice").await.is_empty());
    }

    #[tokio::test]
    async fn test_chat_validation_and_unknown_session() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (status, body) = send(&state, json_request("POST", "/chat", json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing session_id or message");

        let (status, body) = send(
            &state,
            json_request("POST", "/chat", json!({"session_id": "nope", "message": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Invalid or expired chat session");

        let (status, body) = send(&state, get("/chat/history/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Chat session not found");
    }

    #[tokio::test]
    async fn test_documents_empty_for_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(&test_state(dir.path()), get("/documents/nobody")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[test]
    fn test_from_config_builds_state() {
        let state = AppState::from_config(ServiceConfig::default()).unwrap();
        assert_eq!(state.config.summary.max_chars, crate::DEFAULT_MAX_CHARS);
    }
}
