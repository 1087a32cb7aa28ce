//! Error types for session transitions

use quizforge_domain::{QuestionType, SettingsError, Stage};
use thiserror::Error;

/// Reasons an event is refused; the session state is left unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The event is not accepted in the current stage
    #[error("event '{event}' is not valid in the {stage:?} stage")]
    InvalidEvent {
        /// Stage the session was in
        stage: Stage,
        /// Name of the refused event
        event: &'static str,
    },

    /// Submitted settings failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// No question in the working set has this id
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),

    /// The batch has no questions for this type
    #[error("no questions available for {0}")]
    UnavailableType(QuestionType),
}
