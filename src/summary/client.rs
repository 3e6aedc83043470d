//! Per-chunk summarization against the LLM API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::cleanup::clean_summary;
use super::prompt::summary_prompt;
use crate::error::LlmError;
use crate::llm::{CompletionRequest, LlmApi};
use crate::types::{ChatMessage, SummaryConfig};

/// Produces the summary fragment for one chunk.
///
/// An empty string means the chunk yielded no usable summary. Implementors
/// never fail: every error is absorbed into the empty fragment.
#[async_trait]
pub trait ChunkSummarizer: Send + Sync {
    async fn summarize_chunk(&self, index: usize, chunk: &str) -> String;
}

/// Summarizes single chunks through an [`LlmApi`].
pub struct SummaryClient {
    llm: Arc<dyn LlmApi>,
    config: SummaryConfig,
}

impl SummaryClient {
    /// Create a new summary client.
    pub fn new(llm: Arc<dyn LlmApi>, config: SummaryConfig) -> Self {
        Self { llm, config }
    }

    fn build_request(&self, chunk: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(summary_prompt(chunk))],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: Some(self.config.top_p),
        }
    }

    /// Request and clean a summary, without the length check.
    async fn request_summary(&self, chunk: &str) -> Result<String, LlmError> {
        let response = self.llm.complete(&self.build_request(chunk)).await?;
        let raw = response.first_content()?;
        debug!(raw_len = raw.chars().count(), "Raw summary text");
        Ok(clean_summary(raw))
    }
}

#[async_trait]
impl ChunkSummarizer for SummaryClient {
    async fn summarize_chunk(&self, index: usize, chunk: &str) -> String {
        let cleaned = match self.request_summary(chunk).await {
            Ok(cleaned) => cleaned,
            Err(e) => {
                warn!(chunk = index, error = %e, "Chunk summary request failed");
                return String::new();
            }
        };

        let len = cleaned.chars().count();
        if len < self.config.min_summary_chars {
            warn!(
                chunk = index,
                len,
                min = self.config.min_summary_chars,
                "Summary too short, discarding"
            );
            return String::new();
        }

        info!(chunk = index, len, "Chunk summarized");
        cleaned
    }
}
