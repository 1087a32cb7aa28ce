//! Error types for question generation

use quizforge_content::ContentError;
use quizforge_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while generating questions
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The document could not be turned into text
    #[error("Extraction error: {0}")]
    Extraction(#[from] ContentError),

    /// No backend credential configured
    #[error("No API credential configured")]
    Auth,

    /// Backend answered with a non-success status
    #[error("Backend error: HTTP {status}: {body}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The backend could not be reached
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response was not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Response was JSON but not an array of questions
    #[error("Invalid question format: {0}")]
    Format(String),

    /// Generation for one question type took too long
    #[error("Generation timeout after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential => GenerationError::Auth,
            LlmError::Backend { status, body } => GenerationError::Backend { status, body },
            LlmError::RateLimitExceeded => GenerationError::Backend {
                status: 429,
                body: "rate limit exceeded".to_string(),
            },
            LlmError::InvalidResponse(msg) => GenerationError::Parse(msg),
            LlmError::Communication(msg) | LlmError::Other(msg) => {
                GenerationError::Communication(msg)
            }
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::Parse(e.to_string())
    }
}
