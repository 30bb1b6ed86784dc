//! Axum route handlers for the prompt editor API. No authentication.

use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::prompts::store::StoreError;
use crate::state::AppState;

const SAVED_MESSAGE: &str = "프롬프트가 성공적으로 저장되었습니다.";

/// GET /api/prompts
pub async fn handle_get_prompts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let document = state.prompts.read().await.map_err(AppError::PromptRead)?;
    Ok(Json(document))
}

/// PUT /api/prompts
///
/// Body is a (partial) prompt document; its top-level keys overwrite the
/// stored ones. A `password` field is accepted and discarded.
pub async fn handle_update_prompts(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // Parsed here rather than with the Json extractor so a bad body gets the
    // same `{"error"}` response as a failed write.
    let patch: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::PromptWrite(StoreError::Decode(e)))?;

    let merged = state
        .prompts
        .update(patch)
        .await
        .map_err(AppError::PromptWrite)?;
    info!("Prompt document updated at {}", state.prompts.path().display());

    Ok(Json(json!({
        "message": SAVED_MESSAGE,
        "data": merged,
    })))
}
