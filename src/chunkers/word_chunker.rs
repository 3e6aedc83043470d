//! Greedy word-bounded chunker with a character budget.

use super::base::{char_len, Chunker};

/// Packs whole words into chunks until the character budget is reached.
///
/// The running cost of a chunk is the sum of its word lengths plus its word
/// count, one separator per word. A word is appended while
/// `cost + len(word) + words < max_chars`; otherwise the chunk is closed and
/// the word starts the next one. Words are never split, so a single word at
/// or over the budget becomes its own oversized chunk.
pub struct WordChunker;

impl WordChunker {
    /// Create a new word chunker.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunker for WordChunker {
    fn name(&self) -> &'static str {
        "word"
    }

    fn chunk(&self, text: &str, max_chars: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_chars = 0;

        for word in text.split_whitespace() {
            let len = char_len(word);

            if current_chars + len + current.len() < max_chars {
                current.push(word);
                current_chars += len;
            } else {
                if !current.is_empty() {
                    chunks.push(current.join(" "));
                }
                current = vec![word];
                current_chars = len;
            }
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        chunks
    }
}
