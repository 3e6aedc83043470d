//! Cleanup of raw model output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INST_MARKER: Regex = Regex::new(r"(?i)\[/?INST\]").expect("valid marker regex");
}

/// Strip serving-stack control tokens from a raw completion.
///
/// Removes `<s>` and `</s>` and any `[INST]` / `[/INST]` marker regardless of
/// case, trimming before and after.
pub fn clean_summary(raw: &str) -> String {
    let trimmed = raw.trim().replace("<s>", "").replace("</s>", "");
    INST_MARKER.replace_all(&trimmed, "").trim().to_string()
}
