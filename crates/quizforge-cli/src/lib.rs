//! QuizForge CLI library.
//!
//! Argument parsing, configuration, output formatting and the interactive
//! quiz flow behind the `quizforge` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use interactive::{EditorPrompter, Prompter, RunOptions};
pub use output::Formatter;
