mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod prompts;
mod questionnaire;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{Extractor, OcrEngine};
use crate::llm_client::LlmClient;
use crate::prompts::defaults::default_bundle;
use crate::prompts::store::PromptStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Questionnaire API v{}", env!("CARGO_PKG_VERSION"));

    // Prompt document: seeded on first start, then read per request
    let prompts = PromptStore::new(&config.prompts_path);
    prompts
        .seed_if_missing(&default_bundle())
        .await
        .context("Failed to seed the prompt document")?;
    info!("Prompt document at {}", prompts.path().display());

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_api_base);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let extractor = Extractor::new(OcrEngine::new(config.tesseract_cmd.clone()));
    info!(
        "Document extractor ready (ocr: {}, images {})",
        config.tesseract_cmd,
        if config.ocr_images { "OCR'd" } else { "sent inline" }
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        prompts,
        extractor,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
