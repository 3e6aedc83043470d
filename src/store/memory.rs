//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::error::StoreError;
use crate::types::{ChatMessage, ChatSession, Document};

/// In-memory store for documents and chat sessions.
pub struct InMemoryStore {
    documents: RwLock<HashMap<String, Document>>,
    chats: RwLock<HashMap<String, ChatSession>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            chats: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_document(&self, document: Document) {
        let mut documents = self.documents.write().await;
        documents.insert(document.session_id.clone(), document);
    }

    async fn insert_chat(&self, chat: ChatSession) {
        let mut chats = self.chats.write().await;
        chats.insert(chat.session_id.clone(), chat);
    }

    async fn find_document(&self, session_id: &str) -> Option<Document> {
        self.documents.read().await.get(session_id).cloned()
    }

    async fn find_chat(&self, session_id: &str) -> Option<ChatSession> {
        self.chats.read().await.get(session_id).cloned()
    }

    async fn list_documents(&self, user_id: &str) -> Vec<Document> {
        let documents = self.documents.read().await;
        let mut owned: Vec<Document> = documents
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    async fn append_turn(
        &self,
        session_id: &str,
        user: ChatMessage,
        assistant: ChatMessage,
    ) -> Result<(), StoreError> {
        let mut chats = self.chats.write().await;
        match chats.get_mut(session_id) {
            Some(chat) => {
                chat.history.push(user);
                chat.history.push(assistant);
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("chat session {}", session_id))),
        }
    }

    async fn mark_has_chat(&self, session_id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(session_id) {
            Some(document) => {
                document.has_chat = true;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("document {}", session_id))),
        }
    }
}
