//! Document text extraction.
//!
//! Converts an uploaded PDF or DOCX into a single line of plain text: page or
//! paragraph texts in document order, blanks dropped, joined with one space.
//! Parsing is CPU-bound and some documents make the PDF backend panic, so all
//! work runs on the blocking pool where a panic surfaces as a `JoinError`.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Extractor task aborted: {0}")]
    Aborted(String),
}

/// Document formats the service can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Pdf, DocumentKind::Docx];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => ".pdf",
            DocumentKind::Docx => ".docx",
        }
    }

    /// Detects the format from the file-name suffix. Matching is case-sensitive.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| filename.ends_with(kind.extension()))
    }

    /// Comma-separated list used in rejection messages, e.g. `.pdf, .docx`.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Extracts plain text from `bytes` according to `kind`.
pub async fn extract_text(kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract(&bytes),
        DocumentKind::Docx => docx::extract(&bytes),
    })
    .await
    .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

/// Trims each piece, drops blank ones and joins the rest with a single space.
pub(crate) fn join_non_empty<I, S>(pieces: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pieces
        .into_iter()
        .filter_map(|piece| {
            let trimmed = piece.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename_accepts_supported_suffixes() {
        assert_eq!(
            DocumentKind::from_filename("jane_doe_resume.pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_filename("cv.final.docx"),
            Some(DocumentKind::Docx)
        );
    }

    #[test]
    fn test_from_filename_rejects_everything_else() {
        for name in [
            "resume.doc",
            "resume.txt",
            "resume.pdf.exe",
            "resume",
            "",
            "pdf",
            "resume.PDF",
            "resume.Docx",
        ] {
            assert_eq!(DocumentKind::from_filename(name), None, "{name}");
        }
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(DocumentKind::supported_list(), ".pdf, .docx");
    }

    #[test]
    fn test_join_non_empty_skips_blanks_and_keeps_order() {
        let joined = join_non_empty(["Experience", "", "  ", "\nRust, Go\n", "Education"]);
        assert_eq!(joined, "Experience Rust, Go Education");
    }

    #[tokio::test]
    async fn test_extract_text_garbage_pdf_is_an_error() {
        let result = extract_text(DocumentKind::Pdf, Bytes::from_static(b"not a pdf at all")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extract_text_garbage_docx_is_an_error() {
        let result = extract_text(DocumentKind::Docx, Bytes::from_static(b"PK\x03\x04 broken")).await;
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }
}
