//! QuizForge LLM Provider Layer
//!
//! Chat-completion backends behind a single async trait.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing and offline runs
//! - `OpenRouterProvider`: OpenRouter-compatible chat-completion API
//!
//! # Examples
//!
//! ```
//! use quizforge_llm::{LlmProvider, MockProvider};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let result = runtime.block_on(provider.generate(None, "test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openrouter;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use openrouter::OpenRouterProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API credential configured; nothing was sent
    #[error("No API credential configured")]
    MissingCredential,

    /// Backend answered with a non-success status
    #[error("Backend returned HTTP {status}: {body}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response arrived but did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded after all retries
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A text-generation backend
///
/// `system` is an optional system message; `prompt` is the user message.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate free-form text
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError>;

    /// Generate text the backend is asked to format as a JSON object
    ///
    /// Providers without a JSON mode fall back to `generate`.
    async fn generate_structured(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, LlmError> {
        self.generate(system, prompt).await
    }

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(system, prompt).await
    }

    async fn generate_structured(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, LlmError> {
        (**self).generate_structured(system, prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are matched by prompt fragment: the first registered fragment
/// contained in the prompt wins, otherwise the default response is returned.
/// Clones share replies and counters.
///
/// # Examples
///
/// ```
/// use quizforge_llm::{LlmProvider, MockProvider};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("true/false", r#"{"questions": []}"#);
/// provider.add_error("short answer");
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let reply = runtime.block_on(provider.generate(None, "Generate true/false questions")).unwrap();
/// assert_eq!(reply, r#"{"questions": []}"#);
/// assert!(runtime.block_on(provider.generate(None, "Generate short answer questions")).is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    replies: Arc<Mutex<Vec<(String, MockReply)>>>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            replies: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep this long inside every call before replying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reply with `response` to any prompt containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.lock_replies()
            .push((fragment.into(), MockReply::Text(response.into())));
    }

    /// Fail any prompt containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.lock_replies().push((fragment.into(), MockReply::Error));
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// Highest number of calls observed running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, Vec<(String, MockReply)>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply_for(&self, prompt: &str) -> MockReply {
        self.lock_replies()
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, _system: Option<&str>, prompt: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.reply_for(prompt) {
            MockReply::Text(text) => Ok(text),
            MockReply::Error => Err(LlmError::Other("Mock error".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
