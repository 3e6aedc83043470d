//! Configuration types for the service.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_LLM_URL, DEFAULT_MAX_CHARS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SUMMARY_CONCURRENCY, MIN_SUMMARY_CHARS,
};

/// Connection settings for the chat-completions API.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Full URL of the chat-completions endpoint
    pub api_url: String,

    /// Bearer credential
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_URL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Create a config for the given endpoint and key.
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for per-chunk summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Model used for chunk summaries
    pub model: String,

    /// Character budget per chunk
    pub max_chars: usize,

    /// Cleaned summaries shorter than this are dropped
    pub min_summary_chars: usize,

    /// Chunk requests in flight at once
    pub concurrency: usize,

    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: "meta-llama/llama-3.2-3b-instruct:free".to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            min_summary_chars: MIN_SUMMARY_CHARS,
            concurrency: DEFAULT_SUMMARY_CONCURRENCY,
            temperature: 0.7,
            max_tokens: 600,
            top_p: 0.9,
        }
    }
}

impl SummaryConfig {
    /// Set the concurrency. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Global service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port the HTTP server binds to
    pub port: u16,

    /// Directory for temporary uploads
    pub upload_dir: String,

    /// Maximum multipart body size in bytes
    pub max_upload_bytes: usize,

    /// Model used for document chat
    pub chat_model: String,

    pub llm: LlmConfig,
    pub summary: SummaryConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            upload_dir: "uploads".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            chat_model: "mistralai/mistral-7b-instruct:free".to_string(),
            llm: LlmConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let summary_concurrency = env_parse("SUMMARY_CONCURRENCY", defaults.summary.concurrency);

        Self {
            port: env_parse("PORT", defaults.port),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            llm: LlmConfig::new(
                &std::env::var("OPENROUTER_URL").unwrap_or(defaults.llm.api_url),
                &std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            )
            .with_timeout_secs(env_parse("LLM_TIMEOUT_SECS", defaults.llm.timeout_secs)),
            summary: SummaryConfig {
                model: std::env::var("SUMMARY_MODEL").unwrap_or(defaults.summary.model),
                max_chars: env_parse("MAX_CHARS", defaults.summary.max_chars),
                min_summary_chars: env_parse("MIN_SUMMARY_CHARS", defaults.summary.min_summary_chars),
                ..defaults.summary
            }
            .with_concurrency(summary_concurrency),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
