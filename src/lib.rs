//! LegalEase Service Library
//!
//! Summarizes uploaded legal documents with an LLM and keeps a
//! document-grounded chat transcript per upload session.

pub mod api;
pub mod chat;
pub mod chunkers;
pub mod error;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod text;
pub mod types;

pub use chunkers::{Chunker, WordChunker};
pub use error::{ApiError, ExtractionError, LlmError, StoreError};
pub use summary::{SummaryAssembler, SummaryClient};
pub use text::normalize;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chat::ChatService;
    pub use crate::chunkers::{Chunker, WordChunker};
    pub use crate::llm::{LlmApi, OpenRouterClient};
    pub use crate::pipeline::UploadPipeline;
    pub use crate::store::{DocumentStore, InMemoryStore};
    pub use crate::summary::{SummaryAssembler, SummaryClient};
    pub use crate::types::*;
}

/// Default chunk budget in characters
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Cleaned summaries shorter than this are treated as non-answers
pub const MIN_SUMMARY_CHARS: usize = 10;

/// Default LLM request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of chunk summaries requested at once
pub const DEFAULT_SUMMARY_CONCURRENCY: usize = 4;

/// Default chat-completions endpoint
pub const DEFAULT_LLM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Maximum accepted upload size (20MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
