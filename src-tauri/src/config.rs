//! Runtime configuration from the process environment.
//!
//! `.env` is loaded once at startup (see `lib::run`). The API key is read
//! at request time so a key exported after launch is picked up, and a
//! missing key degrades to the assistant's fallback reply.

use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables checked for the API key, first non-empty wins.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub api_base: String,
    /// `None` leaves reqwest's defaults in place (no overall timeout).
    pub request_timeout: Option<Duration>,
    pub api_key_vars: &'static [&'static str],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
            api_key_vars: API_KEY_VARS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = get("VISION_AR_REQUEST_TIMEOUT_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    log::warn!("[CONFIG] Ignoring invalid VISION_AR_REQUEST_TIMEOUT_SECS={}", raw);
                    None
                }
            }
        });

        Self {
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: get("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout,
            api_key_vars: defaults.api_key_vars,
        }
    }

    pub fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Current API key, read from the environment on every call.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }
}
