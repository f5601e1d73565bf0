//! Google Gemini `generateContent` client (non-streaming).
//!
//! Requests run with a zero thinking budget for minimum latency. The API
//! key is read from the environment per request.

use super::{GenerationError, TextGenerator};
use crate::config::AppConfig;
use serde_json::{json, Value};

/// Longest error body kept for logs.
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl GeminiClient {
    pub fn new(config: AppConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().unwrap_or_else(|e| {
            log::warn!("[LLM] Custom HTTP client failed to build ({}), using defaults", e);
            reqwest::Client::new()
        });
        Self { http, config }
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            log::warn!("[LLM] No API key set ({})", self.config.api_key_vars.join(" / "));
            GenerationError::MissingApiKey
        })?;

        log::info!("[LLM] Model: {}", self.config.model);
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.config.generate_content_url())
            .header("x-goog-api-key", &api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
            log::warn!("[LLM] Prompt blocked: {}", reason);
        }

        extract_text(&body).ok_or(GenerationError::EmptyResponse)
    }
}

/// Request payload: one user turn, thinking disabled.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ],
        "generationConfig": {
            "thinkingConfig": { "thinkingBudget": 0 }
        }
    })
}

/// Concatenate the text parts of the first candidate.
///
/// Returns `None` when there is no candidate or the text is blank.
pub fn extract_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter(|p| !p["thought"].as_bool().unwrap_or(false))
        .filter_map(|p| p["text"].as_str())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
