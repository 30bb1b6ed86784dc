use std::sync::Arc;

use crate::config::Config;
use crate::extraction::Extractor;
use crate::llm_client::ChatCompletion;
use crate::prompts::store::PromptStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: `LlmClient`; tests swap in a recorder.
    pub llm: Arc<dyn ChatCompletion>,
    /// Prompt document on disk. Read per request, never cached.
    pub prompts: PromptStore,
    pub extractor: Extractor,
    pub config: Config,
}
