//! Flat-file prompt document.
//!
//! The document is re-read on every access; there is no in-process cache and
//! no write lock, so concurrent updates are last-writer-wins.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::prompts::bundle::PromptBundle;

/// Top-level field the editor posts alongside the prompts. Never persisted.
const PASSWORD_FIELD: &str = "password";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("prompt file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("prompt file {path} could not be written: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("prompt document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("prompt document must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone)]
pub struct PromptStore {
    path: PathBuf,
}

impl PromptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the whole stored document.
    pub async fn read(&self) -> Result<Value, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Reads the document and decodes the sections the assembler uses.
    pub async fn load_bundle(&self) -> Result<PromptBundle, StoreError> {
        let document = self.read().await?;
        Ok(serde_json::from_value(document)?)
    }

    /// Shallow-merges `patch` over the stored document and rewrites the file.
    ///
    /// Each top-level key in `patch` replaces the stored key wholesale; keys
    /// absent from `patch` are kept. The `password` field is dropped.
    pub async fn update(&self, patch: Value) -> Result<Value, StoreError> {
        let Value::Object(mut patch) = patch else {
            return Err(StoreError::NotAnObject);
        };
        patch.remove(PASSWORD_FIELD);

        let Value::Object(mut document) = self.read().await? else {
            return Err(StoreError::NotAnObject);
        };
        document.extend(patch);

        let merged = Value::Object(document);
        self.write(&merged).await?;
        Ok(merged)
    }

    /// Writes `bundle` as the initial document when none exists yet.
    /// Returns whether a document was written.
    pub async fn seed_if_missing(&self, bundle: &PromptBundle) -> Result<bool, StoreError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(false);
        }
        let document = serde_json::to_value(bundle)?;
        self.write(&document).await?;
        info!("Seeded default prompt document at {}", self.path.display());
        Ok(true)
    }

    async fn write(&self, document: &Value) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
        }
        let body = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PromptStore {
        PromptStore::new(dir.path().join("data").join("prompts.json"))
    }

    async fn seeded(dir: &TempDir) -> PromptStore {
        let store = store_in(dir);
        store
            .write(&json!({
                "basePrompts": {"noResumeNoJobPosting": "BASE"},
                "positionPrompts": {"영업·BizDev": "old", "재무·회계": "finance"},
                "outputFormats": {"noResumeNoJobPosting": "OUT"}
            }))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_update_replaces_only_posted_top_level_keys() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir).await;

        let merged = store
            .update(json!({"positionPrompts": {"영업·BizDev": "X"}}))
            .await
            .unwrap();

        assert_eq!(merged["positionPrompts"], json!({"영업·BizDev": "X"}));
        assert_eq!(merged["basePrompts"], json!({"noResumeNoJobPosting": "BASE"}));
        assert_eq!(merged["outputFormats"], json!({"noResumeNoJobPosting": "OUT"}));

        let on_disk = store.read().await.unwrap();
        assert_eq!(on_disk, merged);
    }

    #[tokio::test]
    async fn test_update_drops_password_field() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir).await;

        let merged = store
            .update(json!({"password": "hunter2", "experiencePrompts": {"신입": "N"}}))
            .await
            .unwrap();

        assert!(merged.get("password").is_none());
        assert!(store.read().await.unwrap().get("password").is_none());
        assert_eq!(merged["experiencePrompts"]["신입"], "N");
    }

    #[tokio::test]
    async fn test_update_rejects_non_object_body() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir).await;
        let err = store.update(json!(["not", "an", "object"])).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject));
    }

    #[tokio::test]
    async fn test_update_without_document_fails_to_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let err = store.update(json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[tokio::test]
    async fn test_read_invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let store = PromptStore::new(dir.path().join("prompts.json"));
        tokio::fs::write(store.path(), "{ not json").await.unwrap();
        assert!(matches!(store.read().await.unwrap_err(), StoreError::Decode(_)));
    }

    #[tokio::test]
    async fn test_seed_creates_directory_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut bundle = PromptBundle::default();
        bundle.base_prompts.resume_job_posting = "seeded".to_string();

        assert!(store.seed_if_missing(&bundle).await.unwrap());
        assert!(!store.seed_if_missing(&PromptBundle::default()).await.unwrap());
        assert_eq!(store.load_bundle().await.unwrap(), bundle);
    }

    #[tokio::test]
    async fn test_load_bundle_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .write(&json!({
                "basePrompt": "legacy",
                "companyTypePrompts": {"공공기관": "P"}
            }))
            .await
            .unwrap();

        let bundle = store.load_bundle().await.unwrap();
        assert_eq!(bundle.company_type_prompts.lookup("공공기관"), "P");
    }
}
