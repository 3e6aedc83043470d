//! Base trait for all chunkers.

/// The core trait that all chunkers must implement.
///
/// A chunker splits normalized text into an ordered sequence of non-empty
/// chunks, each sent to the LLM as one summarization unit.
pub trait Chunker: Send + Sync {
    /// Get the name of this chunker.
    fn name(&self) -> &'static str;

    /// Chunk the given text against a character budget.
    ///
    /// # Arguments
    /// * `text` - Normalized document text
    /// * `max_chars` - Character budget per chunk
    ///
    /// # Returns
    /// Chunks in document order. Empty text yields no chunks.
    fn chunk(&self, text: &str, max_chars: usize) -> Vec<String>;
}

/// Length of `text` in characters rather than bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
