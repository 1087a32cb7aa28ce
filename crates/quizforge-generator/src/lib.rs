//! QuizForge Generator
//!
//! Converts an uploaded document into quiz questions using an LLM.
//!
//! # Architecture
//!
//! ```text
//! SourceFile → ContentExtractor → text ─┬─ PromptBuilder → GenerationClient → Vec<Question> (mcq)
//!                                       ├─ PromptBuilder → GenerationClient → Vec<Question> (trueFalse)
//!                                       └─ ...                                 │
//!                                                                              ▼
//!                                                   GenerationBatch (failed types → demo content)
//! ```
//!
//! # Key Features
//!
//! - **Single extraction**: the document is read once per run and shared by
//!   every generation
//! - **Concurrent fan-out**: one request per requested type, all in flight at
//!   once, each bounded by a timeout
//! - **Per-type fallback**: a failed type gets demonstration questions while
//!   the others keep their live results
//! - **Offline mode**: without a credential the built-in demonstration batch
//!   is served and nothing is read or sent
//!
//! # Example Usage
//!
//! ```no_run
//! use quizforge_content::SourceFile;
//! use quizforge_domain::{QuestionType, QuizSettings};
//! use quizforge_generator::{GeneratorConfig, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig::default()
//!     .with_api_key(std::env::var("OPENROUTER_API_KEY").ok());
//! let pipeline = Pipeline::from_config(&config)?;
//!
//! let file = SourceFile::open("lecture-notes.pdf").await?;
//! let settings = QuizSettings::with_types([QuestionType::Mcq, QuestionType::TrueFalse]);
//! let batch = pipeline
//!     .process(&file, None, &settings.requested_types(), &settings)
//!     .await?;
//!
//! for (question_type, questions) in batch.iter() {
//!     println!("{}: {} questions", question_type.label(), questions.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod demo;
mod error;
mod parser;
mod pipeline;
mod prompt;

#[cfg(test)]
mod tests;

pub use client::GenerationClient;
pub use config::GeneratorConfig;
pub use demo::{demo_batch, demo_questions};
pub use error::GenerationError;
pub use parser::parse_questions;
pub use pipeline::Pipeline;
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
