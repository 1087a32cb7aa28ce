//! Configuration for question generation

use quizforge_llm::openrouter::{
    DEFAULT_APP_TITLE, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound for one question type's generation (seconds)
///
/// Covers every attempt at the default request timeout plus the backoff
/// between them.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 150;

/// Configuration for the generation backend and pipeline
///
/// `api_key` decides the mode: without it the pipeline serves the built-in
/// demonstration questions and never touches the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chat-completion URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Bearer credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Timeout for a single HTTP request (seconds)
    pub request_timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,

    /// Upper bound for one question type's generation, retries included (seconds)
    pub generation_timeout_secs: u64,

    /// `X-Title` header sent to the backend
    pub app_title: String,

    /// Optional `HTTP-Referer` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

impl GeneratorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the per-type generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Set the credential
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Whether a non-blank credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        let attempts_budget = self
            .request_timeout_secs
            .saturating_mul(u64::from(self.max_retries));
        if self.generation_timeout_secs < attempts_budget {
            return Err(format!(
                "generation_timeout_secs ({}) must cover max_retries x request_timeout_secs ({})",
                self.generation_timeout_secs, attempts_budget
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            app_title: DEFAULT_APP_TITLE.to_string(),
            referer: None,
        }
    }
}
