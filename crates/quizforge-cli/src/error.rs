//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be opened
    #[error("{0}")]
    Content(#[from] quizforge_content::ContentError),

    /// Pipeline could not be built
    #[error("{0}")]
    Generation(#[from] quizforge_generator::GenerationError),

    /// Question generation failed for the whole document
    #[error("Question generation failed: {0}")]
    GenerationFailed(String),

    /// Session refused an action
    #[error("{0}")]
    Transition(#[from] quizforge_session::TransitionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor error
    #[error("Editor error: {0}")]
    Editor(String),
}
