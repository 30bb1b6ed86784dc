use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::prompts::store::StoreError;
use crate::questionnaire::DocumentRole;

pub const MISSING_FIELDS_MESSAGE: &str =
    "채용공고가 없는 경우 직무, 경력, 기업형태, 주요 업무 내용은 필수 입력 항목입니다.";
pub const FILE_TOO_LARGE_MESSAGE: &str = "파일 크기는 10MB를 초과할 수 없습니다.";
pub const UNSUPPORTED_FILE_MESSAGE: &str = "PDF, DOCX 또는 이미지 파일만 업로드 가능합니다.";
pub const MALFORMED_FORM_MESSAGE: &str = "요청 형식이 올바르지 않습니다.";
pub const GENERATION_FAILED_MESSAGE: &str = "질문 생성 중 오류가 발생했습니다. 다시 시도해주세요.";
pub const PROMPT_READ_FAILED_MESSAGE: &str = "프롬프트를 불러오는 중 오류가 발생했습니다.";
pub const PROMPT_WRITE_FAILED_MESSAGE: &str = "프롬프트 저장 중 오류가 발생했습니다.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The response body is always `{"error": "<user-facing message>"}`; the
/// detailed cause only goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("required form fields missing")]
    MissingRequiredFields,

    #[error("{document} upload is {size} bytes, over the limit")]
    FileTooLarge { document: DocumentRole, size: usize },

    #[error("{document} upload has unsupported type {mime}")]
    UnsupportedFileType { document: DocumentRole, mime: String },

    #[error("malformed multipart form: {0}")]
    MalformedForm(String),

    #[error("{document} extraction failed: {source}")]
    Extraction {
        document: DocumentRole,
        source: ExtractionError,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("prompt document unavailable for generation: {0}")]
    PromptsUnavailable(StoreError),

    #[error("prompt read failed: {0}")]
    PromptRead(StoreError),

    #[error("prompt write failed: {0}")]
    PromptWrite(StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingRequiredFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE),
            AppError::FileTooLarge { .. } => (StatusCode::BAD_REQUEST, FILE_TOO_LARGE_MESSAGE),
            AppError::UnsupportedFileType { .. } => {
                (StatusCode::BAD_REQUEST, UNSUPPORTED_FILE_MESSAGE)
            }
            AppError::MalformedForm(_) => (StatusCode::BAD_REQUEST, MALFORMED_FORM_MESSAGE),
            AppError::Extraction { document, .. } => {
                (StatusCode::BAD_REQUEST, document.extraction_failed_message())
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
            }
            AppError::PromptsUnavailable(e) => {
                tracing::error!("Prompt document unavailable: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE)
            }
            AppError::PromptRead(e) => {
                tracing::error!("Prompt read error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, PROMPT_READ_FAILED_MESSAGE)
            }
            AppError::PromptWrite(e) => {
                tracing::error!("Prompt write error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, PROMPT_WRITE_FAILED_MESSAGE)
            }
        };

        // Client errors are logged here once; server errors log in their arm.
        if status.is_client_error() {
            tracing::warn!("Rejected request: {self}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts every event emitted while installed.
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn events_logged_by(error: AppError) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(EventCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let _ = error.into_response();
        });
        count.load(Ordering::SeqCst)
    }

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_are_400_with_specific_message() {
        let (status, body) = body_of(AppError::FileTooLarge {
            document: DocumentRole::Resume,
            size: 11 * 1024 * 1024,
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": FILE_TOO_LARGE_MESSAGE }));
    }

    #[tokio::test]
    async fn test_extraction_error_uses_per_document_message() {
        let (status, body) = body_of(AppError::Extraction {
            document: DocumentRole::JobPosting,
            source: ExtractionError::Pdf("broken xref".to_string()),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "채용공고 파일 처리 중 오류가 발생했습니다.");
    }

    #[test]
    fn test_each_error_is_logged_once() {
        let extraction = AppError::Extraction {
            document: DocumentRole::Resume,
            source: ExtractionError::Docx("missing word/document.xml".to_string()),
        };
        assert_eq!(events_logged_by(extraction), 1);
        assert_eq!(events_logged_by(AppError::MissingRequiredFields), 1);
        assert_eq!(events_logged_by(AppError::Llm(LlmError::EmptyContent)), 1);
    }

    #[tokio::test]
    async fn test_upstream_errors_hide_detail() {
        let (status, body) = body_of(AppError::Llm(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-***".to_string(),
        }))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_prompt_errors_distinguish_read_and_write() {
        let (_, read) = body_of(AppError::PromptRead(StoreError::NotAnObject)).await;
        let (_, write) = body_of(AppError::PromptWrite(StoreError::NotAnObject)).await;
        assert_eq!(read["error"], PROMPT_READ_FAILED_MESSAGE);
        assert_eq!(write["error"], PROMPT_WRITE_FAILED_MESSAGE);
    }
}
