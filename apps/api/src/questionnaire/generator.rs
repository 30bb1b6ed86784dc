//! Questionnaire generation — orchestrates the pipeline for one submission.
//!
//! Flow: validate → prepare résumé / job posting (extract text or inline
//!       image) → load prompt bundle → assemble prompt → completion → parse.
//!
//! Every step awaits the previous one; any failure aborts the request.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{DocumentKind, Extractor, UploadedFile};
use crate::llm_client::prompts::{JOB_POSTING_IMAGE, RESUME_AND_JOB_POSTING_IMAGES, RESUME_IMAGE};
use crate::llm_client::{complete_json, ChatCompletion, ChatMessage, ContentPart};
use crate::models::questionnaire::QuestionnaireOutput;
use crate::prompts::assembler::{assemble_prompt, PromptInput};
use crate::prompts::store::PromptStore;
use crate::questionnaire::form::GenerateForm;
use crate::questionnaire::DocumentRole;

/// How an uploaded document reaches the model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedDocument {
    /// Extracted text, substituted into the prompt.
    pub text: String,
    /// `data:` URL for images attached to the request instead of OCR'd.
    pub image_url: Option<String>,
}

/// Runs the full generation pipeline for one submitted form.
///
/// Steps:
/// 1. validate the form (size, type, required fields)
/// 2. prepare each document: images are inlined unless `ocr_images`,
///    everything else goes through the extractor
/// 3. load the prompt bundle for this request and assemble the system prompt
/// 4. call the model and decode the reply as `QuestionnaireOutput`
pub async fn generate_questionnaire(
    llm: &dyn ChatCompletion,
    prompts: &PromptStore,
    extractor: &Extractor,
    ocr_images: bool,
    form: GenerateForm,
) -> Result<QuestionnaireOutput, AppError> {
    form.validate()?;

    let resume = prepare_document(
        extractor,
        DocumentRole::Resume,
        form.resume.as_ref(),
        ocr_images,
    )
    .await?;
    let job_posting = prepare_document(
        extractor,
        DocumentRole::JobPosting,
        form.job_posting.as_ref(),
        ocr_images,
    )
    .await?;

    let bundle = prompts
        .load_bundle()
        .await
        .map_err(AppError::PromptsUnavailable)?;

    let input = PromptInput {
        position: &form.position,
        experience: &form.experience,
        company_type: &form.company_type,
        main_tasks: &form.main_tasks,
        organizational_focus: &form.organizational_focus,
        resume_text: &resume.text,
        job_posting_text: &job_posting.text,
    };
    let case = input.case();
    let prompt = assemble_prompt(&bundle, &input);
    info!(
        "Assembled {:?} prompt ({} chars) for position '{}'",
        case,
        prompt.chars().count(),
        form.position
    );

    let messages = build_messages(
        prompt,
        resume.image_url.as_deref(),
        job_posting.image_url.as_deref(),
    );
    info!("Sending completion request with {} message(s)", messages.len());

    let questionnaire: QuestionnaireOutput = complete_json(llm, &messages).await?;
    info!(
        "Generated {} common and {} individual question(s)",
        questionnaire.common_questions.len(),
        questionnaire.individual_questions.len()
    );

    Ok(questionnaire)
}

/// Turns an optional upload into prompt text or an inline image.
pub async fn prepare_document(
    extractor: &Extractor,
    document: DocumentRole,
    file: Option<&UploadedFile>,
    ocr_images: bool,
) -> Result<PreparedDocument, AppError> {
    let Some(file) = file else {
        return Ok(PreparedDocument::default());
    };

    if file.kind() == DocumentKind::Image && !ocr_images {
        info!("Attaching {document} image ({} bytes) inline", file.len());
        return Ok(PreparedDocument {
            text: String::new(),
            image_url: Some(data_url(file)),
        });
    }

    let text = extractor
        .extract(file)
        .await
        .map_err(|source| AppError::Extraction { document, source })?;
    info!("Extracted {} chars from {document}", text.chars().count());

    Ok(PreparedDocument {
        text,
        image_url: None,
    })
}

/// System message with the prompt. When images are attached, one user
/// message follows with an instruction and then the images, résumé first.
pub fn build_messages(
    prompt: String,
    resume_image: Option<&str>,
    job_posting_image: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(prompt)];

    let instruction = match (resume_image, job_posting_image) {
        (Some(_), Some(_)) => RESUME_AND_JOB_POSTING_IMAGES,
        (Some(_), None) => RESUME_IMAGE,
        (None, Some(_)) => JOB_POSTING_IMAGE,
        (None, None) => return messages,
    };

    let mut parts = vec![ContentPart::text(instruction)];
    parts.extend(
        [resume_image, job_posting_image]
            .into_iter()
            .flatten()
            .map(ContentPart::image),
    );
    messages.push(ChatMessage::user_parts(parts));
    messages
}

fn data_url(file: &UploadedFile) -> String {
    format!("data:{};base64,{}", file.mime(), STANDARD.encode(&file.bytes))
}
