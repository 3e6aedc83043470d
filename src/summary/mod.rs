//! Chunk-by-chunk summarization of document text.
//!
//! Text flows through [`crate::text::normalize`], a [`crate::Chunker`], one
//! [`SummaryClient`] call per chunk and finally the [`SummaryAssembler`],
//! which keeps the accepted fragments in chunk order.

mod assembler;
mod cleanup;
mod client;
mod prompt;

pub use assembler::{SummaryAssembler, SummaryReport};
pub use cleanup::clean_summary;
pub use client::{ChunkSummarizer, SummaryClient};
pub use prompt::summary_prompt;
