//! Document text extraction for uploaded résumés and job postings.
//!
//! The upload is classified once into a [`DocumentKind`] and dispatched to the
//! matching backend: `pdf-extract` for PDF, the OOXML reader for DOCX, and an
//! external tesseract process for images.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod docx;
pub mod ocr;
pub mod pdf;

pub use ocr::OcrEngine;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The extraction backend a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Image,
    Unsupported,
}

impl DocumentKind {
    /// Classifies a file by declared MIME type, falling back to the file name.
    pub fn detect(mime: &str, file_name: Option<&str>) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        let is_docx_name = file_name
            .map(|name| name.to_ascii_lowercase().ends_with(".docx"))
            .unwrap_or(false);

        if mime == "application/pdf" {
            DocumentKind::Pdf
        } else if mime == DOCX_MIME || is_docx_name {
            DocumentKind::Docx
        } else if mime.starts_with("image/") {
            DocumentKind::Image
        } else {
            DocumentKind::Unsupported
        }
    }
}

/// One file part of the generate form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Effective MIME type. Browsers sometimes send no type or the generic
    /// octet-stream, in which case the extension decides.
    pub fn mime(&self) -> String {
        match self.content_type.as_deref() {
            Some(declared) if !declared.is_empty() && declared != "application/octet-stream" => {
                declared.to_string()
            }
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .unwrap_or("application/octet-stream")
                .to_string(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::detect(&self.mime(), self.file_name.as_deref())
    }
}

/// Dispatches uploads to the extraction backend for their kind.
#[derive(Debug, Clone)]
pub struct Extractor {
    ocr: OcrEngine,
}

impl Extractor {
    pub fn new(ocr: OcrEngine) -> Self {
        Self { ocr }
    }

    /// Returns the plain text of `file`, or an empty string for an empty upload.
    pub async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        if file.is_empty() {
            return Ok(String::new());
        }

        let kind = file.kind();
        debug!(
            "Extracting {:?} document ({} bytes, name={:?})",
            kind,
            file.len(),
            file.file_name
        );

        match kind {
            DocumentKind::Pdf => pdf::extract_pdf_text(file.bytes.clone()).await,
            DocumentKind::Docx => docx::extract_docx_text(&file.bytes),
            DocumentKind::Image => self.ocr.recognize(&file.bytes).await,
            DocumentKind::Unsupported => Err(ExtractionError::Unsupported(file.mime())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        assert_eq!(
            DocumentKind::detect("application/pdf", Some("cv.pdf")),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn test_detect_docx_by_mime_and_by_name() {
        assert_eq!(DocumentKind::detect(DOCX_MIME, None), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::detect("application/zip", Some("Resume.DOCX")),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_detect_images() {
        for mime in ["image/png", "image/jpeg", "image/jpg", "IMAGE/WEBP"] {
            assert_eq!(DocumentKind::detect(mime, None), DocumentKind::Image);
        }
    }

    #[test]
    fn test_detect_unsupported() {
        assert_eq!(
            DocumentKind::detect("text/plain", Some("notes.txt")),
            DocumentKind::Unsupported
        );
        assert_eq!(
            DocumentKind::detect("application/msword", Some("old.doc")),
            DocumentKind::Unsupported
        );
    }

    #[test]
    fn test_mime_falls_back_to_extension() {
        let file = UploadedFile::new(
            Some("scan.png".to_string()),
            Some("application/octet-stream".to_string()),
            Bytes::from_static(b"x"),
        );
        assert_eq!(file.mime(), "image/png");
        assert_eq!(file.kind(), DocumentKind::Image);

        let file = UploadedFile::new(Some("cv.pdf".to_string()), None, Bytes::from_static(b"x"));
        assert_eq!(file.kind(), DocumentKind::Pdf);
    }

    #[test]
    fn test_declared_mime_wins_over_extension() {
        let file = UploadedFile::new(
            Some("cv.pdf".to_string()),
            Some("image/jpeg".to_string()),
            Bytes::from_static(b"x"),
        );
        assert_eq!(file.kind(), DocumentKind::Image);
    }

    #[tokio::test]
    async fn test_empty_upload_extracts_to_empty_string() {
        let extractor = Extractor::new(OcrEngine::new("tesseract"));
        let file = UploadedFile::new(
            Some("cv.pdf".to_string()),
            Some("application/pdf".to_string()),
            Bytes::new(),
        );
        assert_eq!(extractor.extract(&file).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_unsupported_upload_fails() {
        let extractor = Extractor::new(OcrEngine::new("tesseract"));
        let file = UploadedFile::new(
            Some("notes.txt".to_string()),
            Some("text/plain".to_string()),
            Bytes::from_static(b"hello"),
        );
        let err = extractor.extract(&file).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported(ref m) if m == "text/plain"));
    }
}
