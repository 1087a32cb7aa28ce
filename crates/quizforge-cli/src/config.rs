//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use quizforge_domain::{Difficulty, QuestionType, QuizSettings};
use quizforge_generator::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, stored at `~/.quizforge/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Quiz defaults and display settings
    #[serde(default)]
    pub settings: Settings,
}

/// Quiz defaults and display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default questions per type
    pub question_count: u32,

    /// Default difficulty
    pub difficulty: Difficulty,

    /// Default question types
    pub question_types: Vec<QuestionType>,
}

impl Default for Settings {
    fn default() -> Self {
        let quiz = QuizSettings::default();
        Self {
            color: true,
            question_count: quiz.number_of_questions,
            difficulty: quiz.difficulty_level,
            question_types: quiz.question_types,
        }
    }
}

impl Settings {
    /// Quiz settings built from these defaults.
    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            question_types: self.question_types.clone(),
            number_of_questions: self.question_count,
            difficulty_level: self.difficulty,
            custom_prompt: None,
        }
    }
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".quizforge").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.generator.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }
}
