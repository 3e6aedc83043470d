//! Wire types for the chat-completions API.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::ChatMessage;

/// Request body for one completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Response body of a completion.
///
/// Every field is optional so that shape deviations surface as
/// [`LlmError`] values from [`CompletionResponse::first_content`] rather
/// than as decode failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Build a response holding a single assistant message.
    pub fn with_content(content: &str) -> Self {
        Self {
            choices: Some(vec![Choice {
                message: Some(ResponseMessage {
                    role: Some("assistant".to_string()),
                    content: Some(content.to_string()),
                }),
            }]),
        }
    }

    /// Content of the first choice's message.
    pub fn first_content(&self) -> Result<&str, LlmError> {
        let first = self
            .choices
            .as_deref()
            .and_then(|choices| choices.first())
            .ok_or(LlmError::EmptyChoices)?;

        first
            .message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .ok_or_else(|| LlmError::MalformedResponse("choice has no message content".to_string()))
    }
}
