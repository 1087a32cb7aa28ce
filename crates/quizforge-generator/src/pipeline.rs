//! Pipeline orchestrator - document in, generation batch out

use crate::client::GenerationClient;
use crate::config::{GeneratorConfig, DEFAULT_GENERATION_TIMEOUT_SECS};
use crate::demo::{demo_batch, demo_questions};
use crate::error::GenerationError;
use crate::prompt::PromptBuilder;
use futures::future::join_all;
use quizforge_content::{ContentExtractor, SourceFile};
use quizforge_domain::{GenerationBatch, ProfileData, Question, QuestionType, QuizSettings};
use quizforge_llm::OpenRouterProvider;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS);

/// Main pipeline: extracts a document once and generates every requested
/// question type concurrently
///
/// Without a generation client the pipeline runs offline and serves the
/// demonstration questions.
pub struct Pipeline {
    extractor: ContentExtractor,
    client: Option<GenerationClient>,
    generation_timeout: Duration,
}

impl Pipeline {
    /// Pipeline that generates live through `client`
    pub fn online(client: GenerationClient) -> Self {
        Self {
            extractor: ContentExtractor::new(),
            client: Some(client),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Pipeline that always serves demonstration questions
    pub fn offline() -> Self {
        Self {
            extractor: ContentExtractor::new(),
            client: None,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Build from configuration: online with an OpenRouter provider when a
    /// credential is present, offline otherwise
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the configuration is invalid.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::Config)?;

        let pipeline = if config.has_credential() {
            let mut provider =
                OpenRouterProvider::new(&config.endpoint, &config.model, config.api_key.clone())
                    .with_timeout(config.request_timeout())
                    .with_max_retries(config.max_retries)
                    .with_app_title(&config.app_title);
            if let Some(referer) = &config.referer {
                provider = provider.with_referer(referer);
            }
            Self::online(GenerationClient::new(provider))
        } else {
            Self::offline()
        };

        Ok(pipeline.with_generation_timeout(config.generation_timeout()))
    }

    /// Replace the content extractor
    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the bound for one type's generation
    pub fn with_generation_timeout(mut self, generation_timeout: Duration) -> Self {
        self.generation_timeout = generation_timeout;
        self
    }

    /// Whether the pipeline serves demonstration questions only
    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Turn a document into questions for every requested type
    ///
    /// Offline, the document is not read and all four demonstration types are
    /// returned. Online, the text is extracted once and each type is generated
    /// concurrently; a type whose generation fails or times out gets its
    /// demonstration questions instead.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Extraction`] if the document cannot be read.
    /// Per-type failures never surface.
    pub async fn process(
        &self,
        file: &SourceFile,
        profile: Option<&ProfileData>,
        types: &[QuestionType],
        settings: &QuizSettings,
    ) -> Result<GenerationBatch, GenerationError> {
        let Some(client) = &self.client else {
            info!(file = %file.name(), "No generation credential, serving demonstration questions");
            return Ok(demo_batch());
        };

        let text = self.extractor.extract(file).await?;
        info!(
            file = %file.name(),
            text_len = text.len(),
            types = types.len(),
            model = client.model_name(),
            "Extracted document, generating questions"
        );

        let requested = QuestionType::unique(types);

        let text = text.as_str();
        let generations = requested.into_iter().map(|question_type| async move {
            let questions = self
                .generate_type(client, text, profile, question_type, settings)
                .await;
            (question_type, questions)
        });

        let batch = join_all(generations)
            .await
            .into_iter()
            .map(|(question_type, result)| match result {
                Ok(questions) => {
                    debug!(%question_type, count = questions.len(), "Generated questions");
                    (question_type, questions)
                }
                Err(e) => {
                    warn!(%question_type, error = %e, "Generation failed, using demonstration questions");
                    (question_type, demo_questions(question_type))
                }
            })
            .collect();

        Ok(batch)
    }

    async fn generate_type(
        &self,
        client: &GenerationClient,
        text: &str,
        profile: Option<&ProfileData>,
        question_type: QuestionType,
        settings: &QuizSettings,
    ) -> Result<Vec<Question>, GenerationError> {
        let prompt = PromptBuilder::new(text, question_type, settings)
            .with_profile(profile)
            .build();

        timeout(self.generation_timeout, client.generate(&prompt, question_type))
            .await
            .map_err(|_| GenerationError::Timeout(self.generation_timeout.as_secs()))?
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("client", &self.client)
            .field("generation_timeout", &self.generation_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_key_is_offline() {
        let pipeline = Pipeline::from_config(&GeneratorConfig::default()).unwrap();
        assert!(pipeline.is_offline());
    }

    #[test]
    fn test_from_config_with_key_is_online() {
        let config = GeneratorConfig::default().with_api_key(Some("sk-or-test".to_string()));
        let pipeline = Pipeline::from_config(&config).unwrap();
        assert!(!pipeline.is_offline());
        assert_eq!(pipeline.generation_timeout, Duration::from_secs(150));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let mut config = GeneratorConfig::default();
        config.model = String::new();
        assert!(matches!(
            Pipeline::from_config(&config),
            Err(GenerationError::Config(_))
        ));
    }
}
