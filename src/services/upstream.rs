//! Clients for the external inference services: the retrieval-augmented
//! chat backend and the image generation API.

use std::time::Duration;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    rag_chat_url: String,
    image_model_url: String,
    huggingface_api_key: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            rag_chat_url: config.rag_chat_url.clone(),
            image_model_url: config.image_model_url.clone(),
            huggingface_api_key: config.huggingface_api_key.clone(),
        })
    }

    /// Forward a chat message and return the backend's JSON body as is.
    pub async fn rag_chat(&self, message: &str, user_id: Uuid) -> AppResult<Value> {
        let response = self
            .http
            .post(&self.rag_chat_url)
            .json(&json!({ "message": message, "userId": user_id }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("RAG backend unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("RAG backend error {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Upstream(format!("RAG backend sent invalid JSON: {e}")))
    }

    /// Generate an image for `prompt`. Returns the raw PNG bytes.
    pub async fn generate_image(&self, prompt: &str) -> AppResult<Vec<u8>> {
        let response = self
            .http
            .post(&self.image_model_url)
            .bearer_auth(&self.huggingface_api_key)
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Image API unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Image API error {status}: {body}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Image API body error: {e}")))?;
        Ok(bytes.to_vec())
    }
}
