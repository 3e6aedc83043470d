//! Whitespace and punctuation normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
    static ref SPACE_BEFORE_PUNCT: Regex =
        Regex::new(r#"\s([?.!,"])"#).expect("valid punctuation regex");
}

/// Normalize extracted text.
///
/// Collapses every whitespace run (newlines and tabs included) to a single
/// space, glues `? . ! , "` to the preceding token and trims both ends.
/// The result contains no multi-space runs and no space before those marks.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let glued = SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1");
    glued.trim().to_string()
}

/// Number of whitespace-separated words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
