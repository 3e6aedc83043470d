//! Chunking strategies for document text.

mod base;
mod word_chunker;

pub use base::{char_len, Chunker};
pub use word_chunker::WordChunker;
