use lopdf::Document;

use super::ExtractionError;

/// Extracts text page by page in page order, concatenated with no separator.
///
/// Only a container that cannot be opened is an error. A page whose text cannot
/// be decoded (scanned image, exotic font encoding) contributes an empty string.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::CorruptDocument("empty PDF upload".to_string()));
    }

    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractionError::CorruptDocument(format!("cannot open PDF: {e}")))?;

    let mut text = String::new();
    // get_pages is a BTreeMap keyed by 1-based page number, so iteration is page order.
    for page_number in doc.get_pages().into_keys() {
        match doc.extract_text(&[page_number]) {
            // lopdf ends each text block with '\n'; the page's last one is not content.
            Ok(page_text) => text.push_str(page_text.strip_suffix('\n').unwrap_or(&page_text)),
            Err(e) => {
                tracing::debug!(page = page_number, "Skipping unreadable PDF page: {e}");
            }
        }
    }

    Ok(text)
}
