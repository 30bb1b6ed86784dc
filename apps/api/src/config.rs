use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_PROMPTS_PATH: &str = "data/prompts.json";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub prompts_path: PathBuf,
    pub tesseract_cmd: String,
    /// When set, image uploads are OCR'd into prompt text instead of being
    /// attached to the completion request as inline images.
    pub ocr_images: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_base: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string()),
            prompts_path: std::env::var("PROMPTS_PATH")
                .unwrap_or_else(|_| DEFAULT_PROMPTS_PATH.to_string())
                .into(),
            tesseract_cmd: std::env::var("TESSERACT_CMD")
                .unwrap_or_else(|_| "tesseract".to_string()),
            ocr_images: std::env::var("OCR_IMAGES")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .context("OCR_IMAGES must be 'true' or 'false'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
