//! Async driver that runs the pipeline when settings are submitted

use crate::error::TransitionError;
use crate::event::Event;
use crate::state::SessionState;
use quizforge_domain::QuizSettings;
use quizforge_generator::Pipeline;
use tracing::{info, warn};

/// A quiz session bound to a generation pipeline
///
/// Events are applied through [`SessionState::apply`]; submitting settings
/// additionally runs the pipeline and feeds its outcome back as
/// [`Event::GenerationFinished`] or [`Event::GenerationFailed`].
pub struct QuizSession {
    pipeline: Pipeline,
    state: SessionState,
}

impl QuizSession {
    /// Start a session at the upload stage
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: SessionState::new(),
        }
    }

    /// Current state, for rendering
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The pipeline this session generates with
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Apply a user action, running generation when it is due
    ///
    /// Submitting settings is [`begin_generation`](Self::begin_generation)
    /// followed by [`finish_generation`](Self::finish_generation).
    ///
    /// # Errors
    ///
    /// Returns the [`TransitionError`] of a refused event; the state is
    /// unchanged in that case. Pipeline failures are not errors here: they
    /// move the session into the failed generation status.
    pub async fn handle(&mut self, event: Event) -> Result<&SessionState, TransitionError> {
        if let Event::SettingsSubmitted(settings) = event {
            self.begin_generation(settings)?;
            return self.finish_generation().await;
        }

        self.state = self.state.apply(event)?;
        Ok(&self.state)
    }

    /// Submit settings and stop in the loading state
    ///
    /// The returned state reports [`SessionState::is_loading`] until
    /// [`finish_generation`](Self::finish_generation) runs the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] if settings are not accepted now or are
    /// invalid.
    pub fn begin_generation(&mut self, settings: QuizSettings) -> Result<&SessionState, TransitionError> {
        self.state = self.state.apply(Event::SettingsSubmitted(settings))?;
        Ok(&self.state)
    }

    /// Run the pipeline for a pending generation and record its outcome
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::InvalidEvent`] when no generation is pending.
    pub async fn finish_generation(&mut self) -> Result<&SessionState, TransitionError> {
        if !self.state.is_loading() {
            return Err(TransitionError::InvalidEvent {
                stage: self.state.stage(),
                event: "generation_finished",
            });
        }

        let outcome = self.generate().await;
        self.state = match self.state.apply(outcome) {
            Ok(next) => next,
            // A batch the controller cannot show counts as a failed run
            Err(e) => self.state.apply(Event::GenerationFailed(e.to_string()))?,
        };
        Ok(&self.state)
    }

    async fn generate(&self) -> Event {
        let (Some(file), Some(settings)) = (self.state.file(), self.state.settings()) else {
            return Event::GenerationFailed("no document or settings to generate from".to_string());
        };

        let types = settings.requested_types();
        match self
            .pipeline
            .process(file, self.state.profile(), &types, settings)
            .await
        {
            Ok(batch) => {
                info!(types = batch.len(), "Question batch ready");
                Event::GenerationFinished(batch)
            }
            Err(e) => {
                warn!(error = %e, "Question generation failed");
                Event::GenerationFailed(e.to_string())
            }
        }
    }
}
