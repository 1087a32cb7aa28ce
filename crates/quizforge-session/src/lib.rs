//! QuizForge Session
//!
//! The stage controller for one quiz: upload → profile → settings →
//! questions → results, with retry and new-test branches.
//!
//! # Architecture
//!
//! - [`SessionState`] owns every session field; [`transition`] is a pure
//!   `(state, event) -> state` function, so each step is testable alone
//! - [`QuizSession`] wraps a state and a [`quizforge_generator::Pipeline`],
//!   running generation when settings are submitted
//!
//! # Examples
//!
//! ```
//! use quizforge_content::SourceFile;
//! use quizforge_domain::{ProfileData, QuestionType, QuizSettings, Stage};
//! use quizforge_generator::Pipeline;
//! use quizforge_session::{Event, QuizSession};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut session = QuizSession::new(Pipeline::offline());
//! let file = SourceFile::new("notes.txt", "text/plain", b"Paris is the capital of France.".to_vec());
//!
//! session.handle(Event::FileSelected(file)).await.unwrap();
//! session.handle(Event::ProfileSubmitted(ProfileData::default())).await.unwrap();
//! let state = session
//!     .handle(Event::SettingsSubmitted(QuizSettings::with_types([QuestionType::Mcq])))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(state.stage(), Stage::Questions);
//! assert_eq!(state.questions()[0].text(), "What is the capital of France?");
//! # });
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod session;
pub mod state;

pub use error::TransitionError;
pub use event::Event;
pub use session::QuizSession;
pub use state::{transition, GenerationStatus, SessionState};
