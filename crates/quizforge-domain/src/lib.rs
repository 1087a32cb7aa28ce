//! QuizForge Domain Layer
//!
//! Core value types shared by every other crate: questions and their
//! formats, the user's profile and quiz settings, the generation batch,
//! the journey stages and scoring.
//!
//! ## Key Concepts
//!
//! - **Question**: a prompt plus reference answer; options exist only for
//!   multiple choice, enforced by construction
//! - **Generation batch**: every requested format's questions from one run
//! - **Stage**: a step of the linear journey upload → results
//! - **Score**: exact-match count of user answers against reference answers
//!
//! ## Architecture
//!
//! - No I/O, no async runtime
//! - Pure data and rules only
//! - Extraction, generation and session control live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod profile;
pub mod question;
pub mod score;
pub mod settings;
pub mod stage;

// Re-exports for convenience
pub use batch::GenerationBatch;
pub use profile::ProfileData;
pub use question::{Question, QuestionError, QuestionKind, QuestionType};
pub use score::{score, ScoreReport};
pub use settings::{Difficulty, QuizSettings, SettingsError, MAX_QUESTIONS, MIN_QUESTIONS};
pub use stage::Stage;
