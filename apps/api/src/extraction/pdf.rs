use crate::extraction::{join_non_empty, ExtractionError};

/// Extracts text from every page, in page order.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(join_non_empty(pages))
}
