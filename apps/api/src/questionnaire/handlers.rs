//! Axum route handler for the questionnaire API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::questionnaire::QuestionnaireOutput;
use crate::questionnaire::form::GenerateForm;
use crate::questionnaire::generator::generate_questionnaire;
use crate::state::AppState;

/// POST /api/generate
///
/// Multipart form: position, experience, companyType, mainTasks,
/// organizationalFocus, and optional `resume` / `jobPosting` files.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuestionnaireOutput>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate", %request_id);

    async move {
        let form = GenerateForm::from_multipart(multipart).await?;
        info!(
            "Received form: resume={}, job_posting={}",
            form.resume.is_some(),
            form.job_posting.is_some()
        );

        let questionnaire = generate_questionnaire(
            state.llm.as_ref(),
            &state.prompts,
            &state.extractor,
            state.config.ocr_images,
            form,
        )
        .await?;

        Ok::<_, AppError>(Json(questionnaire))
    }
    .instrument(span)
    .await
}
