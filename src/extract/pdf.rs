//! PDF text extraction using lopdf.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::error::ExtractionError;

/// Extracts the text layer of a PDF, page by page.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from PDF bytes.
    pub fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(pdf_bytes).map_err(parse_error)?;
        self.extract_text_from_doc(&doc)
    }

    /// Extract text from a PDF file.
    pub fn extract_text_from_file(&self, path: &Path) -> Result<String, ExtractionError> {
        let doc = Document::load(path).map_err(parse_error)?;
        self.extract_text_from_doc(&doc)
    }

    /// Concatenate page texts in page order, one newline after each page.
    fn extract_text_from_doc(&self, doc: &Document) -> Result<String, ExtractionError> {
        let pages = doc.get_pages();
        let mut text = String::new();

        // get_pages is keyed by page number, so iteration is in page order
        for page_num in pages.keys() {
            let page_text = doc.extract_text(&[*page_num]).map_err(parse_error)?;
            text.push_str(page_text.trim_end());
            text.push('\n');
        }

        debug!(pages = pages.len(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

fn parse_error(e: lopdf::Error) -> ExtractionError {
    ExtractionError::Parse {
        format: "PDF",
        message: e.to_string(),
    }
}
