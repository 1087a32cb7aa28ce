//! User actions and pipeline outcomes that drive the session

use quizforge_content::SourceFile;
use quizforge_domain::{GenerationBatch, ProfileData, QuestionType, QuizSettings};

/// Something that happened to the session
#[derive(Debug, Clone)]
pub enum Event {
    /// A document was picked
    FileSelected(SourceFile),

    /// The profile form was submitted, possibly with every field empty
    ProfileSubmitted(ProfileData),

    /// Quiz settings were submitted; generation starts
    SettingsSubmitted(QuizSettings),

    /// The pipeline produced a batch
    GenerationFinished(GenerationBatch),

    /// The pipeline failed as a whole
    GenerationFailed(String),

    /// Show a different question type from the batch
    TypeSwitched(QuestionType),

    /// The user typed or picked an answer
    AnswerChanged {
        /// Question being answered
        question_id: String,
        /// The answer as entered
        answer: String,
    },

    /// The answered working set was submitted for scoring
    QuizSubmitted,

    /// Take the same questions again
    RetryRequested,

    /// Start over with a new document
    NewTestRequested,

    /// Leave a failed generation and pick another document
    ReturnToUpload,
}

impl Event {
    /// Short name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Event::FileSelected(_) => "file_selected",
            Event::ProfileSubmitted(_) => "profile_submitted",
            Event::SettingsSubmitted(_) => "settings_submitted",
            Event::GenerationFinished(_) => "generation_finished",
            Event::GenerationFailed(_) => "generation_failed",
            Event::TypeSwitched(_) => "type_switched",
            Event::AnswerChanged { .. } => "answer_changed",
            Event::QuizSubmitted => "quiz_submitted",
            Event::RetryRequested => "retry_requested",
            Event::NewTestRequested => "new_test_requested",
            Event::ReturnToUpload => "return_to_upload",
        }
    }
}
