//! Text cleanup applied to extracted document text.

mod normalizer;

pub use normalizer::{normalize, word_count};
