//! Generation client - one prompt in, one type's questions out

use crate::error::GenerationError;
use crate::parser::parse_questions;
use crate::prompt::SYSTEM_PROMPT;
use quizforge_domain::{Question, QuestionType};
use quizforge_llm::LlmProvider;
use std::sync::Arc;
use tracing::debug;

/// Sends prompts to a text-generation backend and normalizes the replies
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmProvider>,
}

impl GenerationClient {
    /// Create a client over a provider
    pub fn new(provider: impl LlmProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Model identifier of the underlying provider
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Generate questions of one type from a built prompt
    ///
    /// The backend is asked for JSON output under the quiz-author system
    /// message.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Auth`] if no credential is configured
    /// - [`GenerationError::Backend`] on a non-success HTTP status
    /// - [`GenerationError::Parse`] / [`GenerationError::Format`] on a
    ///   malformed reply
    pub async fn generate(
        &self,
        prompt: &str,
        question_type: QuestionType,
    ) -> Result<Vec<Question>, GenerationError> {
        debug!(%question_type, prompt_len = prompt.len(), "Requesting questions");

        let response = self
            .provider
            .generate_structured(Some(SYSTEM_PROMPT), prompt)
            .await?;
        debug!(%question_type, response_len = response.len(), "Received response");

        parse_questions(&response, question_type)
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("model", &self.provider.model_name())
            .finish()
    }
}
