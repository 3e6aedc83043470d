//! Text extraction from uploaded documents.

mod docx;
mod pdf;

use std::path::Path;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

use crate::error::ExtractionError;

/// Turns a stored upload into raw text.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the file at `path`.
    ///
    /// # Errors
    /// `UnsupportedFormat` for anything other than PDF or DOCX, `Parse` when
    /// the file cannot be read as its declared format.
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

/// Extractor that dispatches on the file extension.
#[derive(Default)]
pub struct FileExtractor {
    pdf: PdfExtractor,
    docx: DocxExtractor,
}

impl FileExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextExtractor for FileExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let text = match DocumentFormat::from_path(path) {
            Some(DocumentFormat::Pdf) => self.pdf.extract_text_from_file(path)?,
            Some(DocumentFormat::Docx) => self.docx.extract_text_from_file(path)?,
            None => {
                return Err(ExtractionError::UnsupportedFormat(
                    path.display().to_string(),
                ))
            }
        };
        Ok(text.trim().to_string())
    }
}
