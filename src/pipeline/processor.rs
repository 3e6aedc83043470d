//! Processor that turns an uploaded file into a stored, summarized document.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ExtractionError;
use crate::extract::TextExtractor;
use crate::store::DocumentStore;
use crate::summary::SummaryAssembler;
use crate::text::{normalize, word_count};
use crate::types::{ChatSession, Document, UploadOutcome};

/// An uploaded file waiting to be processed.
#[derive(Debug, Clone)]
pub struct Upload {
    pub user_id: String,
    /// Original file name
    pub title: String,
    /// Client-supplied upload time
    pub time: Option<String>,
    /// Where the upload was saved; removed once processed
    pub path: PathBuf,
}

/// Extracts, summarizes and stores uploads.
pub struct UploadPipeline {
    extractor: Arc<dyn TextExtractor>,
    assembler: Arc<SummaryAssembler>,
    store: Arc<dyn DocumentStore>,
    max_chars: usize,
}

impl UploadPipeline {
    /// Create a new upload pipeline.
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        assembler: Arc<SummaryAssembler>,
        store: Arc<dyn DocumentStore>,
        max_chars: usize,
    ) -> Self {
        Self {
            extractor,
            assembler,
            store,
            max_chars,
        }
    }

    /// Process one upload.
    ///
    /// Only extraction can fail. An empty summary is stored like any other.
    /// The uploaded file is removed whether or not extraction succeeds.
    pub async fn process_upload(&self, upload: Upload) -> Result<UploadOutcome, ExtractionError> {
        let extracted = self.extract(&upload).await;
        if let Err(e) = tokio::fs::remove_file(&upload.path).await {
            warn!(path = %upload.path.display(), error = %e, "Failed to remove upload");
        }
        let text = normalize(&extracted?);

        info!(
            title = %upload.title,
            user_id = %upload.user_id,
            text_len = text.chars().count(),
            words = word_count(&text),
            "Extracted document text"
        );

        let report = self
            .assembler
            .summarize_with_report(&text, self.max_chars)
            .await;

        let session_id = Uuid::new_v4().to_string();
        let document = Document {
            user_id: upload.user_id,
            session_id: session_id.clone(),
            title: upload.title,
            created_at: created_at(upload.time.as_deref()),
            time: upload.time,
            full_text: text,
            summary: report.summary.clone(),
            has_chat: false,
        };
        let chat = ChatSession::for_document(&document);

        self.store.insert_document(document).await;
        self.store.insert_chat(chat).await;

        info!(
            session_id = %session_id,
            chunks = report.chunk_count,
            accepted = report.accepted,
            summary_len = report.summary.chars().count(),
            "Stored summarized document"
        );

        Ok(UploadOutcome {
            session_id,
            summary: report.summary,
            chunk_count: report.chunk_count,
        })
    }

    /// Run the blocking extractor off the async workers.
    async fn extract(&self, upload: &Upload) -> Result<String, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        let path = upload.path.clone();
        tokio::task::spawn_blocking(move || extractor.extract_text(&path))
            .await
            .map_err(|e| ExtractionError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
    }
}

/// Creation timestamp: the client's RFC 3339 time when it parses, else now.
fn created_at(time: Option<&str>) -> DateTime<Utc> {
    time.and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
