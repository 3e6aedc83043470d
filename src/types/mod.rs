//! Core types for the summarization service.

mod config;
mod document;
mod requests;

pub use config::{LlmConfig, ServiceConfig, SummaryConfig};
pub use document::{ChatMessage, ChatRole, ChatSession, Document, DocumentListing};
pub use requests::{
    ChatHistoryResponse, ChatRequest, ChatResponse, SummarizeResponse, UploadOutcome,
};
