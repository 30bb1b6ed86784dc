use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::extraction::ExtractionError;

/// Languages the OCR engine is initialized with. Uploads are Korean résumés
/// and postings that routinely mix in English terms.
pub const OCR_LANGUAGES: &str = "kor+eng";

/// Runs the tesseract CLI once per image. Each call spawns a fresh worker
/// process and reaps it before returning.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    command: String,
}

impl OcrEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        // tesseract reads from a path; the temp file is removed on drop.
        let input = tempfile::Builder::new().prefix("ocr-").tempfile()?;
        tokio::fs::write(input.path(), image).await?;

        debug!("Running {} on {} byte image", self.command, image.len());

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(OCR_LANGUAGES)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExtractionError::Ocr(format!("failed to start {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("{} exited with {}: {}", self.command, output.status, stderr.trim());
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}",
                self.command, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_ocr_error() {
        let engine = OcrEngine::new("definitely-not-a-tesseract-binary");
        let err = engine.recognize(b"\x89PNG").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Ocr(ref m) if m.contains("failed to start")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_an_ocr_error() {
        let engine = OcrEngine::new("false");
        let err = engine.recognize(b"\x89PNG").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Ocr(ref m) if m.contains("exited with")));
    }
}
