//! HTTP client for the chat-completions API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{CompletionRequest, CompletionResponse};
use crate::error::LlmError;
use crate::types::LlmConfig;

/// A chat-completions backend.
///
/// Implemented over HTTP by [`OpenRouterClient`] and by in-memory fakes in
/// tests.
#[async_trait]
pub trait LlmApi: Send + Sync {
    /// Send one completion request and return the decoded response.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenRouterClient {
    client: Client,
    config: LlmConfig,
}

impl OpenRouterClient {
    /// Create a new client with the configured request timeout.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl LlmApi for OpenRouterClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(body = %body, "Received completion response");

        serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse(e.to_string()))
    }
}
