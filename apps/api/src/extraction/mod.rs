//! Text Extractor — turns an uploaded document into plain text, dispatching on the
//! declared file extension. Content is never sniffed: an unknown extension is
//! rejected before a single byte of the body is parsed.

pub mod docx;
pub mod pdf;
pub mod upload;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),
}

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from a filename's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = match filename.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return Err(ExtractionError::UnsupportedFormat(String::new())),
        };

        match ext.as_str() {
            "txt" | "text" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }
}

/// Raw upload plus its declared format. Lives for a single extraction call.
#[derive(Debug, Clone)]
pub struct Document {
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(format: DocumentFormat, bytes: impl Into<Bytes>) -> Self {
        Self {
            format,
            bytes: bytes.into(),
        }
    }
}

/// Extracts plain text from a document according to its declared format.
pub fn extract(document: &Document) -> Result<String, ExtractionError> {
    let text = match document.format {
        DocumentFormat::PlainText => extract_plain_text(&document.bytes)?,
        DocumentFormat::Pdf => pdf::extract_pdf(&document.bytes)?,
        DocumentFormat::Docx => docx::extract_docx(&document.bytes)?,
    };

    tracing::debug!(
        format = ?document.format,
        bytes = document.bytes.len(),
        chars = text.chars().count(),
        "Extracted document text"
    );
    Ok(text)
}

/// Strict UTF-8 decode. Invalid sequences fail instead of being replaced.
fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| ExtractionError::CorruptDocument(format!("invalid UTF-8: {e}")))
}
