//! CLI argument parsing.

use clap::Parser;
use quizforge_domain::{Difficulty, QuestionType, QuizSettings};
use std::path::PathBuf;

/// QuizForge - Turn a document into an interactive quiz.
#[derive(Debug, Parser)]
#[command(name = "quizforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Document to build the quiz from (pdf, txt, md, images, docx, ...)
    pub file: PathBuf,

    /// Question types, comma separated (mcq, fillInBlanks, trueFalse, shortAnswer)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<QuestionType>,

    /// Questions per type
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub count: Option<u32>,

    /// Difficulty (easy, medium, hard, expert)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Extra instructions for the question writer
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Use the built-in demonstration questions, even with a key
    #[arg(long)]
    pub offline: bool,

    /// Skip the profile questions
    #[arg(long)]
    pub skip_profile: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Override configured defaults with the flags given on the command line.
    pub fn apply_to(&self, mut settings: QuizSettings) -> QuizSettings {
        if !self.types.is_empty() {
            settings.question_types = self.types.clone();
        }
        if let Some(count) = self.count {
            settings.number_of_questions = count;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty_level = difficulty;
        }
        if self.prompt.is_some() {
            settings.custom_prompt = self.prompt.clone();
        }
        settings
    }

    /// Key to generate with: none when offline, else the flag or environment,
    /// else the configured one.
    pub fn resolve_api_key(&self, configured: Option<String>) -> Option<String> {
        if self.offline {
            return None;
        }
        self.api_key.clone().or(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_args() {
        let cli = Cli::try_parse_from(["quizforge", "notes.pdf"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("notes.pdf"));
        assert!(cli.types.is_empty());
        assert!(cli.count.is_none());
        assert!(!cli.offline);
    }

    #[test]
    fn test_full_args() {
        let cli = Cli::try_parse_from([
            "quizforge",
            "notes.txt",
            "--types",
            "mcq,trueFalse",
            "-n",
            "10",
            "--difficulty",
            "hard",
            "--prompt",
            "Focus on dates",
            "--offline",
            "--skip-profile",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.types, vec![QuestionType::Mcq, QuestionType::TrueFalse]);
        assert_eq!(cli.count, Some(10));
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.prompt.as_deref(), Some("Focus on dates"));
        assert!(cli.offline && cli.skip_profile && cli.no_color);
    }

    #[test]
    fn test_count_out_of_range() {
        assert!(Cli::try_parse_from(["quizforge", "a.txt", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["quizforge", "a.txt", "-n", "21"]).is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(Cli::try_parse_from(["quizforge", "a.txt", "--types", "essay"]).is_err());
    }

    #[test]
    fn test_file_required() {
        assert!(Cli::try_parse_from(["quizforge"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from(["quizforge", "a.txt", "-t", "shortAnswer", "-d", "easy"]).unwrap();
        let settings = cli.apply_to(QuizSettings::with_types([QuestionType::Mcq]));

        assert_eq!(settings.question_types, vec![QuestionType::ShortAnswer]);
        assert_eq!(settings.difficulty_level, Difficulty::Easy);
        assert_eq!(settings.number_of_questions, 5);
        assert!(settings.custom_prompt.is_none());
    }

    #[test]
    fn test_defaults_kept_without_flags() {
        let cli = Cli::try_parse_from(["quizforge", "a.txt"]).unwrap();
        let mut defaults = QuizSettings::with_types([QuestionType::TrueFalse]);
        defaults.number_of_questions = 8;

        assert_eq!(cli.apply_to(defaults.clone()), defaults);
    }

    #[test]
    fn test_offline_drops_key() {
        let cli = Cli::try_parse_from(["quizforge", "a.txt", "--api-key", "sk-flag", "--offline"]).unwrap();
        assert_eq!(cli.resolve_api_key(Some("sk-config".into())), None);

        let cli = Cli::try_parse_from(["quizforge", "a.txt", "--api-key", "sk-flag"]).unwrap();
        assert_eq!(cli.resolve_api_key(Some("sk-config".into())).as_deref(), Some("sk-flag"));
    }
}
