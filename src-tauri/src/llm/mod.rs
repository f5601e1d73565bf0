//! Remote text generation: the assistant's only external dependency.
//!
//! `chat_reply` and `describe` never fail: every error and every empty
//! response collapses to a fixed fallback sentence so the UI always has
//! something to show. No retry, no caching; identical prompts hit the
//! service again.

pub mod gemini;
pub mod prompts;

use std::future::Future;

pub use gemini::GeminiClient;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("{0}")]
    Other(String),
}

/// Anything that turns a prompt into text.
///
/// Implemented by [`GeminiClient`] in production and by scripted mocks in
/// tests.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Answer a user question about the model currently on screen.
pub async fn chat_reply<G: TextGenerator>(generator: &G, user_message: &str, model_name: &str) -> String {
    let prompt = prompts::build_chat_prompt(user_message, model_name);
    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(GenerationError::EmptyResponse) => {
            log::warn!("[LLM] Chat reply was empty, using fallback");
            prompts::CHAT_EMPTY_FALLBACK.to_string()
        }
        Err(e) => {
            log::error!("[LLM] Chat request failed: {}", e);
            prompts::CHAT_ERROR_FALLBACK.to_string()
        }
    }
}

/// Short promotional description of a model.
pub async fn describe<G: TextGenerator>(generator: &G, model_name: &str, description: &str) -> String {
    let prompt = prompts::build_describe_prompt(model_name, description);
    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(GenerationError::EmptyResponse) => {
            log::warn!("[LLM] Insight was empty, using fallback");
            prompts::INSIGHT_EMPTY_FALLBACK.to_string()
        }
        Err(e) => {
            log::error!("[LLM] Insight request failed: {}", e);
            prompts::INSIGHT_ERROR_FALLBACK.to_string()
        }
    }
}
