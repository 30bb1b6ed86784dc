use bytes::Bytes;

use crate::extraction::ExtractionError;

/// Extracts the text layer of a PDF.
///
/// pdf-extract is synchronous and can panic on malformed input, so it runs on
/// the blocking pool and a panic surfaces as an extraction error.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("extractor task aborted: {e}")))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}
