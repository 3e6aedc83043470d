//! Chat service answering questions from a stored document.

use std::sync::Arc;

use tracing::info;

use crate::error::ApiError;
use crate::llm::{CompletionRequest, LlmApi};
use crate::store::DocumentStore;
use crate::types::{ChatHistoryResponse, ChatMessage};

const ANSWER_STYLE_SUFFIX: &str = "\n\nAnswer in simple, easy language.";

/// Build the system prompt that restricts answers to the document text.
pub fn grounding_prompt(document_text: &str) -> String {
    format!(
        "You are a legal-document question-answer assistant. \
         Your ONLY job is to answer questions strictly based on the text of the document. \
         Give clear, direct, factual answers. \
         If the document contains an explicit answer, extract it exactly. \
         Do NOT guess, generalize, or give vague replies. \
         If the answer does not exist in the document, say: \
         'The document does not provide this information.' \
         \n\nDOCUMENT CONTENT BELOW:\n{}\n\n\
         ANSWER THE USER'S QUESTIONS BASED ONLY ON THE ABOVE DOCUMENT.",
        document_text
    )
}

/// Continues and retrieves chat conversations about uploaded documents.
///
/// Unlike chunk summarization, any LLM failure here is returned to the
/// caller and leaves the transcript untouched.
pub struct ChatService {
    llm: Arc<dyn LlmApi>,
    store: Arc<dyn DocumentStore>,
    model: String,
}

impl ChatService {
    pub const TEMPERATURE: f64 = 0.7;
    pub const MAX_TOKENS: u32 = 500;

    /// Create a new chat service.
    pub fn new(llm: Arc<dyn LlmApi>, store: Arc<dyn DocumentStore>, model: &str) -> Self {
        Self {
            llm,
            store,
            model: model.to_string(),
        }
    }

    /// Answer `message` in the context of the session's document.
    pub async fn chat(&self, session_id: &str, message: &str) -> Result<String, ApiError> {
        let chat = self
            .store
            .find_chat(session_id)
            .await
            .ok_or_else(|| ApiError::NotFound("Invalid or expired chat session".to_string()))?;
        let document = self
            .store
            .find_document(session_id)
            .await
            .ok_or_else(|| ApiError::NotFound("Document context not found".to_string()))?;

        let mut messages = Vec::with_capacity(chat.history.len() + 2);
        messages.push(ChatMessage::system(grounding_prompt(&document.full_text)));
        messages.extend(chat.history.iter().cloned());
        messages.push(ChatMessage::user(format!("{}{}", message, ANSWER_STYLE_SUFFIX)));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Self::TEMPERATURE,
            max_tokens: Self::MAX_TOKENS,
            top_p: None,
        };

        let response = self.llm.complete(&request).await?;
        let reply = response.first_content()?.to_string();

        self.store
            .append_turn(
                session_id,
                ChatMessage::user(message),
                ChatMessage::assistant(reply.clone()),
            )
            .await?;
        self.store.mark_has_chat(session_id).await?;

        info!(
            session_id,
            prior_messages = chat.history.len(),
            reply_len = reply.chars().count(),
            "Chat reply stored"
        );
        Ok(reply)
    }

    /// Transcript of a session.
    pub async fn history(&self, session_id: &str) -> Result<ChatHistoryResponse, ApiError> {
        let chat = self
            .store
            .find_chat(session_id)
            .await
            .ok_or_else(|| ApiError::NotFound("Chat session not found".to_string()))?;

        Ok(ChatHistoryResponse {
            session_id: chat.session_id,
            document_title: chat.document_title,
            history: chat.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::llm::CompletionResponse;
    use crate::store::InMemoryStore;
    use crate::types::{ChatRole, ChatSession, Document};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct RecordingLlm {
        reply: Option<&'static str>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmApi for RecordingLlm {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.reply {
                Some(reply) => Ok(CompletionResponse::with_content(reply)),
                None => Err(LlmError::Status {
                    status: 502,
                    body: "bad gateway".into(),
                }),
            }
        }
    }

    async fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let document = Document {
            user_id: "alice".to_string(),
            session_id: "s1".to_string(),
            title: "lease.pdf".to_string(),
            time: None,
            full_text: "Rent is $900 per month.".to_string(),
            summary: String::new(),
            created_at: Utc::now(),
            has_chat: false,
        };
        store.insert_chat(ChatSession::for_document(&document)).await;
        store.insert_document(document).await;
        store
    }

    fn chat_service(
        reply: Option<&'static str>,
        store: Arc<InMemoryStore>,
    ) -> (ChatService, Arc<RecordingLlm>) {
        let llm = Arc::new(RecordingLlm {
            reply,
            requests: Mutex::new(Vec::new()),
        });
        (ChatService::new(llm.clone(), store, "chat-model"), llm)
    }

    #[tokio::test]
    async fn test_chat_grounds_and_records_history() {
        let store = seeded_store().await;
        let (service, llm) = chat_service(Some("It is $900."), store.clone());

        let reply = service.chat("s1", "How much is rent?").await.unwrap();
        assert_eq!(reply, "It is $900.");

        let requests = llm.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.model, "chat-model");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.top_p, None);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert!(request.messages[0].content.contains("Rent is $900 per month."));
        assert_eq!(
            request.messages[1].content,
            "How much is rent?\n\nAnswer in simple, easy language."
        );
        drop(requests);

        let history = service.history("s1").await.unwrap();
        assert_eq!(
            history.history,
            vec![
                ChatMessage::user("How much is rent?"),
                ChatMessage::assistant("It is $900."),
            ]
        );
        assert!(store.find_document("s1").await.unwrap().has_chat);
    }

    #[tokio::test]
    async fn test_prior_history_is_replayed() {
        let store = seeded_store().await;
        let (service, llm) = chat_service(Some("Monthly."), store.clone());

        service.chat("s1", "First?").await.unwrap();
        service.chat("s1", "Second?").await.unwrap();

        let requests = llm.requests.lock().unwrap();
        let second = &requests[1];
        assert_eq!(second.messages.len(), 4);
        assert_eq!(second.messages[1], ChatMessage::user("First?"));
        assert_eq!(second.messages[2], ChatMessage::assistant("Monthly."));
        drop(requests);

        assert_eq!(service.history("s1").await.unwrap().history.len(), 4);
    }

    /// Replies after a delay so that concurrent turns overlap.
    struct SlowLlm;

    #[async_trait]
    impl LlmApi for SlowLlm {
        async fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(CompletionResponse::with_content("Noted."))
        }
    }

    #[tokio::test]
    async fn test_concurrent_turns_are_all_recorded() {
        let store = seeded_store().await;
        let service = ChatService::new(Arc::new(SlowLlm), store.clone(), "chat-model");

        let (first, second) = tokio::join!(
            service.chat("s1", "Who pays rent?"),
            service.chat("s1", "Who pays utilities?")
        );
        assert!(first.is_ok());
        assert!(second.is_ok());

        let history = service.history("s1").await.unwrap().history;
        assert_eq!(history.len(), 4);
        assert!(history.contains(&ChatMessage::user("Who pays rent?")));
        assert!(history.contains(&ChatMessage::user("Who pays utilities?")));
    }

    #[tokio::test]
    async fn test_upstream_failure_leaves_history_untouched() {
        let store = seeded_store().await;
        let (service, _) = chat_service(None, store.clone());

        let err = service.chat("s1", "Anything?").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
        assert!(service.history("s1").await.unwrap().history.is_empty());
        assert!(!store.find_document("s1").await.unwrap().has_chat);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = Arc::new(InMemoryStore::new());
        let (service, _) = chat_service(Some("x"), store);

        let err = service.chat("nope", "Hi").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid or expired chat session");
        let err = service.history("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Chat session not found");
    }

    #[tokio::test]
    async fn test_missing_document_context() {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_chat(ChatSession {
                session_id: "orphan".to_string(),
                document_title: "gone.pdf".to_string(),
                user_id: "alice".to_string(),
                history: vec![],
            })
            .await;
        let (service, _) = chat_service(Some("x"), store);

        let err = service.chat("orphan", "Hi").await.unwrap_err();
        assert_eq!(err.to_string(), "Document context not found");
    }

    #[test]
    fn test_grounding_prompt_embeds_document() {
        let prompt = grounding_prompt("CLAUSE 1.");
        assert!(prompt.contains("DOCUMENT CONTENT BELOW:\nCLAUSE 1.\n\n"));
        assert!(prompt.contains("The document does not provide this information."));
    }
}
