//! Session state and its pure transition function
//!
//! ```text
//! Upload ─file─▶ Profile ─profile─▶ QuizSettings ─settings─▶ Questions ─submit─▶ Results
//!                                                              ▲   │                │
//!                                                              └───┼── retry ───────┤
//!   ◀──────────────────── new test / return to upload ────────────┴────────────────┘
//! ```

use crate::error::TransitionError;
use crate::event::Event;
use quizforge_content::SourceFile;
use quizforge_domain::{
    score, GenerationBatch, ProfileData, Question, QuestionType, QuizSettings, ScoreReport, Stage,
};
use tracing::debug;

/// Progress of question generation while in the `Questions` stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Pipeline running; show a loading indicator instead of questions
    Generating,
    /// Batch available
    Ready,
    /// Pipeline failed; only a reset is accepted
    Failed(String),
}

/// Everything one quiz session owns
///
/// Transitions never mutate in place: [`SessionState::apply`] returns the
/// next state and leaves `self` as it was.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    stage: Stage,
    file: Option<SourceFile>,
    profile: Option<ProfileData>,
    settings: Option<QuizSettings>,
    status: GenerationStatus,
    batch: Option<GenerationBatch>,
    active_type: Option<QuestionType>,
    questions: Vec<Question>,
    answered: Vec<Question>,
    score: usize,
}

impl SessionState {
    /// Fresh session at the upload stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Uploaded document
    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    /// Submitted profile
    pub fn profile(&self) -> Option<&ProfileData> {
        self.profile.as_ref()
    }

    /// Submitted settings
    pub fn settings(&self) -> Option<&QuizSettings> {
        self.settings.as_ref()
    }

    /// Generation progress
    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    /// Whether questions are being generated
    pub fn is_loading(&self) -> bool {
        self.status == GenerationStatus::Generating
    }

    /// Generated batch
    pub fn batch(&self) -> Option<&GenerationBatch> {
        self.batch.as_ref()
    }

    /// Question type shown in the working set
    pub fn active_type(&self) -> Option<QuestionType> {
        self.active_type
    }

    /// Working set being answered
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions as submitted for scoring
    pub fn answered(&self) -> &[Question] {
        &self.answered
    }

    /// Score of the last submission
    pub fn score(&self) -> usize {
        self.score
    }

    /// Results summary, once the quiz has been submitted
    pub fn report(&self) -> Option<ScoreReport> {
        (self.stage == Stage::Results).then(|| ScoreReport::new(self.score, self.answered.len()))
    }

    /// Requested types the user can switch between, in the order requested
    pub fn available_types(&self) -> Vec<QuestionType> {
        let (Some(settings), Some(batch)) = (&self.settings, &self.batch) else {
            return Vec::new();
        };
        settings
            .requested_types()
            .into_iter()
            .filter(|t| batch.contains(*t))
            .collect()
    }

    /// Apply an event, returning the next state
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when the event is not accepted in the
    /// current stage or carries invalid data.
    pub fn apply(&self, event: Event) -> Result<Self, TransitionError> {
        let from = self.stage;
        let name = event.name();
        let next = self.next_state(event)?;
        debug!(event = name, ?from, to = ?next.stage, "Session transition");
        Ok(next)
    }

    fn next_state(&self, event: Event) -> Result<Self, TransitionError> {
        match (self.stage, &self.status, event) {
            (Stage::Upload, _, Event::FileSelected(file)) => Ok(Self {
                stage: Stage::Profile,
                file: Some(file),
                ..self.clone()
            }),

            (Stage::Profile, _, Event::ProfileSubmitted(profile)) => Ok(Self {
                stage: Stage::QuizSettings,
                profile: Some(profile),
                ..self.clone()
            }),

            (Stage::QuizSettings, _, Event::SettingsSubmitted(settings)) => {
                settings.validate()?;
                Ok(Self {
                    stage: Stage::Questions,
                    settings: Some(settings),
                    status: GenerationStatus::Generating,
                    batch: None,
                    active_type: None,
                    questions: Vec::new(),
                    ..self.clone()
                })
            }

            (Stage::Questions, GenerationStatus::Generating, Event::GenerationFinished(batch)) => {
                self.with_batch(batch)
            }

            (Stage::Questions, GenerationStatus::Generating, Event::GenerationFailed(message)) => {
                Ok(Self {
                    status: GenerationStatus::Failed(message),
                    ..self.clone()
                })
            }

            (Stage::Questions, GenerationStatus::Ready, Event::TypeSwitched(question_type)) => {
                self.switched_to(question_type)
            }

            (
                Stage::Questions,
                GenerationStatus::Ready,
                Event::AnswerChanged {
                    question_id,
                    answer,
                },
            ) => {
                let mut next = self.clone();
                let question = next
                    .questions
                    .iter_mut()
                    .find(|q| q.id() == question_id)
                    .ok_or(TransitionError::UnknownQuestion(question_id))?;
                question.set_user_answer(answer);
                Ok(next)
            }

            (Stage::Questions, GenerationStatus::Ready, Event::QuizSubmitted) => {
                let mut next = self.clone();
                next.write_back();
                next.score = score(&next.questions);
                next.answered = next.questions.clone();
                next.stage = Stage::Results;
                Ok(next)
            }

            (Stage::Results, _, Event::RetryRequested) => {
                let mut next = self.clone();
                for question in &mut next.questions {
                    question.clear_user_answer();
                }
                next.write_back();
                next.answered.clear();
                next.score = 0;
                next.stage = Stage::Questions;
                Ok(next)
            }

            (Stage::Results, _, Event::NewTestRequested)
            | (Stage::Questions, GenerationStatus::Failed(_), Event::NewTestRequested)
            | (Stage::Questions, GenerationStatus::Failed(_), Event::ReturnToUpload) => {
                Ok(Self::default())
            }

            (stage, _, event) => Err(TransitionError::InvalidEvent {
                stage,
                event: event.name(),
            }),
        }
    }

    /// Store a finished batch and show the first requested type
    fn with_batch(&self, batch: GenerationBatch) -> Result<Self, TransitionError> {
        let requested = self
            .settings
            .as_ref()
            .map(QuizSettings::requested_types)
            .unwrap_or_default();
        let first = requested.first().copied().unwrap_or(QuestionType::Mcq);
        let questions = batch
            .get(first)
            .ok_or(TransitionError::UnavailableType(first))?
            .to_vec();

        Ok(Self {
            status: GenerationStatus::Ready,
            batch: Some(batch),
            active_type: Some(first),
            questions,
            ..self.clone()
        })
    }

    /// Swap the working set to another type of the same batch
    fn switched_to(&self, question_type: QuestionType) -> Result<Self, TransitionError> {
        if !self.available_types().contains(&question_type) {
            return Err(TransitionError::UnavailableType(question_type));
        }

        let mut next = self.clone();
        next.write_back();
        next.questions = next
            .batch
            .as_ref()
            .and_then(|batch| batch.get(question_type))
            .map(<[Question]>::to_vec)
            .ok_or(TransitionError::UnavailableType(question_type))?;
        next.active_type = Some(question_type);
        Ok(next)
    }

    /// Copy the working set into the batch entry of the active type
    fn write_back(&mut self) {
        if let (Some(batch), Some(active)) = (self.batch.as_mut(), self.active_type) {
            if let Some(entry) = batch.get_mut(active) {
                *entry = self.questions.clone();
            }
        }
    }
}

/// Apply an event to a session state
///
/// Free-function form of [`SessionState::apply`].
pub fn transition(state: &SessionState, event: Event) -> Result<SessionState, TransitionError> {
    state.apply(event)
}
