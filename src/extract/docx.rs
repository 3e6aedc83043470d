//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml` as
//! WordprocessingML. Text runs (`<w:t>`) are concatenated, every
//! paragraph (`</w:p>`) and break (`<w:br>`, `<w:cr>`) ends a line, and
//! run tabs become `\t`. Tab stop definitions (`<w:tabs>`) are skipped.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractionError;

const DOCUMENT_XML: &str = "word/document.xml";

lazy_static! {
    static ref WORD_TOKEN: Regex = Regex::new(concat!(
        r"(?s)<w:t(?:\s[^>]*[^/>])?>(?P<run>.*?)</w:t>",
        r"|(?P<stops><w:tabs>.*?</w:tabs>)",
        r"|(?P<para></w:p>)",
        r"|(?P<brk><w:(?:br|cr)\b[^>]*/>)",
        r"|(?P<tab><w:tab\b[^>]*/>)",
    ))
    .expect("valid WordprocessingML regex");
}

/// Extracts paragraph text from DOCX documents.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from DOCX bytes.
    pub fn extract_text(&self, docx_bytes: &[u8]) -> Result<String, ExtractionError> {
        self.extract_from_reader(Cursor::new(docx_bytes))
    }

    /// Extract text from a DOCX file.
    pub fn extract_text_from_file(&self, path: &Path) -> Result<String, ExtractionError> {
        let file = std::fs::File::open(path)?;
        self.extract_from_reader(file)
    }

    fn extract_from_reader<R: Read + Seek>(&self, reader: R) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(reader).map_err(|e| parse_error(e.to_string()))?;
        let mut entry = archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| parse_error(format!("{}: {}", DOCUMENT_XML, e)))?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| parse_error(format!("{}: {}", DOCUMENT_XML, e)))?;

        Ok(text_from_document_xml(&xml))
    }
}

/// Collect run text from WordprocessingML, one line per paragraph.
fn text_from_document_xml(xml: &str) -> String {
    let mut text = String::new();

    for caps in WORD_TOKEN.captures_iter(xml) {
        if let Some(run) = caps.name("run") {
            text.push_str(&decode_entities(run.as_str()));
        } else if caps.name("para").is_some() || caps.name("brk").is_some() {
            text.push('\n');
        } else if caps.name("tab").is_some() {
            text.push('\t');
        }
    }

    text
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn parse_error(message: String) -> ExtractionError {
    ExtractionError::Parse {
        format: "DOCX",
        message,
    }
}
