pub mod health;


use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::prompts::handlers as prompt_handlers;
use crate::questionnaire::form::MAX_REQUEST_BYTES;
use crate::questionnaire::handlers as questionnaire_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Questionnaire API
        .route(
            "/api/generate",
            post(questionnaire_handlers::handle_generate)
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES)),
        )
        // Prompt editor API
        .route(
            "/api/prompts",
            get(prompt_handlers::handle_get_prompts).put(prompt_handlers::handle_update_prompts),
        )
        .with_state(state)
}
