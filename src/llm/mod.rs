//! Chat-completions API access.

mod client;
mod types;

pub use client::{LlmApi, OpenRouterClient};
pub use types::{Choice, CompletionRequest, CompletionResponse, ResponseMessage};
