/// Build the per-chunk summarization prompt. The chunk is embedded verbatim.
pub fn summary_prompt(chunk: &str) -> String {
    format!(
        "Please provide a concise summary of this legal document in 4-6 sentences. \
         Include: parties involved, main purpose, key amounts (if any), and what is being requested.\n\n\
         Document text:\n{}\n\n\
         Summary:",
        chunk
    )
}
