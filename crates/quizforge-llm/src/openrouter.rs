//! OpenRouter Provider Implementation
//!
//! Talks to an OpenAI-style chat-completion endpoint (OpenRouter by default).
//!
//! # Features
//!
//! - Bearer-token authentication, checked before anything is sent
//! - System and user messages, optional JSON-object response mode
//! - Retry with exponential backoff on rate limits, server errors and
//!   connection failures
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use quizforge_llm::{LlmProvider, OpenRouterProvider};
//!
//! # async fn run() -> Result<(), quizforge_llm::LlmError> {
//! let provider = OpenRouterProvider::new(
//!     "https://openrouter.ai/api/v1/chat/completions",
//!     "google/gemini-2.0-flash-001",
//!     Some("sk-or-...".to_string()),
//! );
//! let reply = provider.generate_structured(Some("You are helpful."), "Say hi as JSON").await?;
//! # Ok(())
//! # }
//! ```

use crate::{LlmError, LlmProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default chat-completion endpoint
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

/// Default timeout for a single HTTP request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per generation
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default `X-Title` header value
pub const DEFAULT_APP_TITLE: &str = "AI Quiz Generator";

/// OpenRouter chat-completion provider
pub struct OpenRouterProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    app_title: String,
    referer: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: full chat-completion URL
    /// - `model`: model identifier sent with every request
    /// - `api_key`: bearer credential; `None` makes every call fail with
    ///   [`LlmError::MissingCredential`] without touching the network
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            app_title: DEFAULT_APP_TITLE.to_string(),
            referer: None,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Provider for the default endpoint and model
    pub fn default_endpoint(api_key: Option<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; it doubles on each further retry
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the `X-Title` header
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = title.into();
        self
    }

    /// Set the `HTTP-Referer` header
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Whether a credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        system: Option<&str>,
        prompt: &str,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self
                .client
                .post(&self.endpoint)
                .timeout(self.timeout)
                .bearer_auth(api_key)
                .header("X-Title", &self.app_title)
                .json(&request_body);
            if let Some(referer) = &self.referer {
                request = request.header("HTTP-Referer", referer);
            }

            debug!(model = %self.model, attempt = attempts + 1, "Sending chat completion request");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Self::read_content(response).await;
                    }

                    let body = response.text().await.unwrap_or_default();
                    warn!(status = status.as_u16(), "Chat completion request rejected");

                    if !Self::is_retryable(status) {
                        return Err(LlmError::Backend {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    last_error = Some(if status == StatusCode::TOO_MANY_REQUESTS {
                        LlmError::RateLimitExceeded
                    } else {
                        LlmError::Backend {
                            status: status.as_u16(),
                            body,
                        }
                    });
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(LlmError::Communication(format!(
                        "Request timed out after {:?}",
                        self.timeout
                    )));
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: base, 2x base, 4x base, ...
                let delay = self.retry_backoff * 2u32.pow(attempts - 1);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    async fn read_content(response: reqwest::Response) -> Result<String, LlmError> {
        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }

    fn is_retryable(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        self.complete(system, prompt, false).await
    }

    async fn generate_structured(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, LlmError> {
        self.complete(system, prompt, true).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenRouterProvider::default_endpoint(Some("key".to_string()));
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.app_title, DEFAULT_APP_TITLE);
        assert!(provider.has_credential());
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let provider = OpenRouterProvider::default_endpoint(Some("  ".to_string()));
        assert!(!provider.has_credential());
    }

    #[test]
    fn test_builders() {
        let provider = OpenRouterProvider::default_endpoint(None)
            .with_max_retries(0)
            .with_timeout(Duration::from_secs(5))
            .with_app_title("Quiz")
            .with_referer("http://localhost");
        assert_eq!(provider.max_retries, 1);
        assert_eq!(provider.timeout, Duration::from_secs(5));
        assert_eq!(provider.app_title, "Quiz");
        assert_eq!(provider.referer.as_deref(), Some("http://localhost"));
    }

    #[test]
    fn test_request_serialization() {
        let body = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");

        let plain = ChatRequest {
            model: "m",
            messages: vec![],
            response_format: None,
        };
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(OpenRouterProvider::is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(OpenRouterProvider::is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!OpenRouterProvider::is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!OpenRouterProvider::is_retryable(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        // Unroutable endpoint: reaching the network would surface as Communication
        let provider = OpenRouterProvider::new("http://127.0.0.1:9/none", "m", None);
        let result = provider.generate(None, "prompt").await;
        assert!(matches!(result, Err(LlmError::MissingCredential)));
    }
}
