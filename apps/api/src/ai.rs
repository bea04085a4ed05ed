//! AI design mockup generation via the Hugging Face inference API.
//!
//! Text prompts are prefixed with a fixed style preamble so every mockup
//! comes back in the house look, then sent to Stable Diffusion XL. The
//! API returns raw image bytes on success, or 503 while the model is
//! cold-loading; the 503 is surfaced to the caller as a retryable error.

use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::debug;

/// Model used for design mockups.
const MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

/// Prepended to every prompt.
const STYLE_PREFIX: &str =
    "fashion photography, masterpiece, highly detailed, nigerian traditional style, ";

/// Image generation failure.
#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    #[error("Image request failed: {0}")]
    Request(String),

    /// The model is cold and still loading. Retryable.
    #[error("Model is loading")]
    ModelLoading,

    #[error("Image API rejected the request: {0}")]
    Rejected(String),
}

/// Client for the Hugging Face inference API.
#[derive(Debug, Clone)]
pub struct ImageGenerator {
    http: Client,
    api_token: String,
    model_url: String,
}

impl ImageGenerator {
    pub fn new(api_token: impl Into<String>) -> Self {
        ImageGenerator {
            http: Client::new(),
            api_token: api_token.into(),
            model_url: MODEL_URL.to_string(),
        }
    }

    /// Generates one design image from a prompt.
    ///
    /// ## Returns
    /// Raw PNG bytes on success.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ImageGenError> {
        let full_prompt = format!("{STYLE_PREFIX}{prompt}");
        debug!(prompt = %prompt, "Generating design image");

        let response = self
            .http
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            // Wait (up to the API's limit) for a cold model instead of
            // failing immediately.
            .header("x-wait-for-model", "true")
            .json(&json!({ "inputs": full_prompt }))
            .send()
            .await
            .map_err(|e| ImageGenError::Request(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ImageGenError::Request(e.to_string()))?;
                Ok(bytes.to_vec())
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(ImageGenError::ModelLoading),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ImageGenError::Rejected(format!("{status}: {body}")))
            }
        }
    }
}
