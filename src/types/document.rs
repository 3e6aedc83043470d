//! Stored document and chat records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded document with its normalized text and summary.
///
/// Created once per upload. Only `summary` and `has_chat` change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub user_id: String,

    /// Session correlating this document with its chat history
    pub session_id: String,

    /// Original file name
    pub title: String,

    /// Client-supplied upload time, echoed back in listings
    pub time: Option<String>,

    /// Normalized extracted text
    pub full_text: String,

    /// Joined chunk summaries, possibly empty
    pub summary: String,

    pub created_at: DateTime<Utc>,

    /// Whether at least one chat exchange happened
    pub has_chat: bool,
}

impl Document {
    /// Project the document into its listing entry.
    pub fn to_listing(&self) -> DocumentListing {
        DocumentListing {
            session_id: self.session_id.clone(),
            title: self.title.clone(),
            time: self.time.clone(),
            icon: DocumentListing::ICON.to_string(),
            has_chat: self.has_chat,
            summary: self.summary.clone(),
        }
    }
}

/// A document as shown in a user's document list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentListing {
    pub session_id: String,
    pub title: String,
    pub time: Option<String>,
    pub icon: String,
    pub has_chat: bool,
    pub summary: String,
}

impl DocumentListing {
    pub const ICON: &'static str = "fas fa-file-alt";
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a conversation, shaped like a chat-completions message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The running chat transcript for one upload session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    pub document_title: String,
    pub user_id: String,
    pub history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start an empty transcript for a freshly stored document.
    pub fn for_document(document: &Document) -> Self {
        Self {
            session_id: document.session_id.clone(),
            document_title: document.title.clone(),
            user_id: document.user_id.clone(),
            history: Vec::new(),
        }
    }
}
