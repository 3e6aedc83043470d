//! Assembly of chunk summaries into one document summary.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::info;

use super::client::ChunkSummarizer;
use crate::chunkers::{char_len, Chunker};
use crate::text::normalize;

/// Outcome of summarizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    /// Accepted fragments joined with single spaces, possibly empty
    pub summary: String,
    /// Number of chunks the normalized text was split into
    pub chunk_count: usize,
    /// Number of chunks that produced a fragment
    pub accepted: usize,
}

/// Orchestrates chunking and per-chunk summarization.
///
/// Chunk requests are independent and run through an ordered stream with at
/// most `concurrency` requests in flight, so fragments come back in chunk
/// order no matter which request finishes first. A failed chunk only loses
/// its own fragment. Summarization as a whole never fails.
pub struct SummaryAssembler {
    chunker: Arc<dyn Chunker>,
    summarizer: Arc<dyn ChunkSummarizer>,
    concurrency: usize,
}

impl SummaryAssembler {
    /// Create a new assembler. A concurrency of zero is treated as one.
    pub fn new(
        chunker: Arc<dyn Chunker>,
        summarizer: Arc<dyn ChunkSummarizer>,
        concurrency: usize,
    ) -> Self {
        Self {
            chunker,
            summarizer,
            concurrency: concurrency.max(1),
        }
    }

    /// Summarize `text`, returning only the final summary.
    pub async fn summarize(&self, text: &str, max_chars: usize) -> String {
        self.summarize_with_report(text, max_chars).await.summary
    }

    /// Summarize `text` and report how many chunks contributed.
    pub async fn summarize_with_report(&self, text: &str, max_chars: usize) -> SummaryReport {
        let normalized = normalize(text);
        let chunks = self.chunker.chunk(&normalized, max_chars);
        let chunk_count = chunks.len();

        info!(
            chunker = self.chunker.name(),
            text_len = char_len(&normalized),
            chunks = chunk_count,
            concurrency = self.concurrency,
            "Split text into chunks"
        );

        // Owned chunks keep the stream's futures `Send` for handler bounds.
        let fragments: Vec<String> = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| {
                info!(
                    chunk = index,
                    total = chunk_count,
                    len = char_len(&chunk),
                    "Processing chunk"
                );
                let summarizer = Arc::clone(&self.summarizer);
                async move { summarizer.summarize_chunk(index, &chunk).await }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let accepted: Vec<String> = fragments.into_iter().filter(|f| !f.is_empty()).collect();
        let summary = accepted.join(" ").trim().to_string();

        info!(
            accepted = accepted.len(),
            chunks = chunk_count,
            summary_len = char_len(&summary),
            "Combined chunk summaries"
        );

        SummaryReport {
            summary,
            chunk_count,
            accepted: accepted.len(),
        }
    }
}
