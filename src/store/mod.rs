//! Persistence of documents and chat transcripts.

mod memory;

use async_trait::async_trait;

pub use memory::InMemoryStore;

use crate::error::StoreError;
use crate::types::{ChatMessage, ChatSession, Document};

/// Key-value store for documents and their chat sessions, keyed by session id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_document(&self, document: Document);

    async fn insert_chat(&self, chat: ChatSession);

    async fn find_document(&self, session_id: &str) -> Option<Document>;

    async fn find_chat(&self, session_id: &str) -> Option<ChatSession>;

    /// All documents of a user, newest first.
    async fn list_documents(&self, user_id: &str) -> Vec<Document>;

    /// Append one question and answer to a session's transcript.
    ///
    /// The append is atomic, so concurrent turns on one session are all kept.
    async fn append_turn(
        &self,
        session_id: &str,
        user: ChatMessage,
        assistant: ChatMessage,
    ) -> Result<(), StoreError>;

    /// Flag the session's document as having a chat.
    async fn mark_has_chat(&self, session_id: &str) -> Result<(), StoreError>;
}
