//! Document intake: format detection, size validation, and text extraction
//! for PDF, DOCX/DOC, and plain-text resumes.

pub mod docx;
pub mod handlers;
pub mod store;
pub mod text;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;

pub use store::UploadStore;

/// Accepted extensions, in the order they are advertised to clients.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid file format. Please upload PDF, DOCX, DOC, or TXT files only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Legacy Word. Routed through the DOCX reader, which only succeeds when
    /// the file is really an OOXML archive with a `.doc` name.
    Doc,
    Txt,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        if filename.trim().is_empty() {
            return Err(AppError::Validation("Filename is required".to_string()));
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "doc" => Ok(DocumentKind::Doc),
            "txt" => Ok(DocumentKind::Txt),
            _ => Err(AppError::UnsupportedFormat(INVALID_FORMAT_MESSAGE.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Doc => "doc",
            DocumentKind::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file received over multipart, before staging.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Checks extension then size; returns the detected kind.
    pub fn validate(&self, max_bytes: u64) -> Result<DocumentKind, AppError> {
        let kind = DocumentKind::from_filename(&self.filename)?;
        if self.bytes.len() as u64 > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {}MB.",
                max_bytes / (1024 * 1024)
            )));
        }
        Ok(kind)
    }
}

/// Extracts raw text from document bytes. CPU-bound; call from a blocking context.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, AppError> {
    let raw = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx | DocumentKind::Doc => docx::extract_text(bytes)?,
        DocumentKind::Txt => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(text::normalize_text(&raw))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::Extraction(format!(
            "Failed to extract text from PDF: {e}"
        ))),
        Err(_) => Err(AppError::Extraction(
            "Failed to extract text from PDF: the document could not be parsed".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("cv.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("cv.Docx").unwrap(), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("cv.doc").unwrap(), DocumentKind::Doc);
        assert_eq!(DocumentKind::from_filename("my.cv.txt").unwrap(), DocumentKind::Txt);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = DocumentKind::from_filename("cv.png").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = DocumentKind::from_filename("resume").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_filename_is_validation_error() {
        let err = DocumentKind::from_filename("  ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_oversize_upload_is_rejected() {
        let upload = Upload::new("cv.txt", vec![b'a'; 2048]);
        let err = upload.validate(1024).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_upload_at_limit_is_accepted() {
        let upload = Upload::new("cv.txt", vec![b'a'; 1024]);
        assert_eq!(upload.validate(1024).unwrap(), DocumentKind::Txt);
    }

    #[test]
    fn test_txt_extraction_is_lossy_and_normalized() {
        let bytes = b"Jane   Doe\n\n  Rust\xFF engineer  \n".to_vec();
        let text = extract_text(DocumentKind::Txt, &bytes).unwrap();
        assert_eq!(text, "Jane Doe\nRust\u{FFFD} engineer");
    }

    #[test]
    fn test_garbage_pdf_is_extraction_error() {
        let err = extract_text(DocumentKind::Pdf, b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_legacy_doc_binary_is_extraction_error() {
        let err = extract_text(DocumentKind::Doc, &[0xD0, 0xCF, 0x11, 0xE0, 0, 0]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
