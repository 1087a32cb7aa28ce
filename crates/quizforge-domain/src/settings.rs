//! Settings module - what the user asked the generator for

use crate::question::QuestionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest number of questions a user may request per format
pub const MIN_QUESTIONS: u32 = 1;

/// Largest number of questions a user may request per format
pub const MAX_QUESTIONS: u32 = 20;

/// Difficulty requested for generated questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Introductory
    Easy,
    /// General audience
    #[default]
    Medium,
    /// Demanding
    Hard,
    /// Specialist
    Expert,
}

impl Difficulty {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Parse from a name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid difficulty: {}", s))
    }
}

/// Reasons a settings submission is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// No question type selected
    #[error("at least one question type must be selected")]
    NoQuestionTypes,

    /// Question count outside the allowed range
    #[error("number of questions must be between {min} and {max}, got {got}")]
    QuestionCountOutOfRange {
        /// Requested count
        got: u32,
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
}

/// Generation settings for one quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    /// Requested formats, in the order the user picked them
    pub question_types: Vec<QuestionType>,

    /// Questions to generate per format
    pub number_of_questions: u32,

    /// Requested difficulty
    pub difficulty_level: Difficulty,

    /// Extra instructions appended to every prompt
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

impl QuizSettings {
    /// Settings for the given formats with default count and difficulty
    pub fn with_types(question_types: impl IntoIterator<Item = QuestionType>) -> Self {
        Self {
            question_types: question_types.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Check the caller-side preconditions for generation
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.question_types.is_empty() {
            return Err(SettingsError::NoQuestionTypes);
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.number_of_questions) {
            return Err(SettingsError::QuestionCountOutOfRange {
                got: self.number_of_questions,
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
            });
        }
        Ok(())
    }

    /// Requested formats with duplicates removed, first occurrence wins
    pub fn requested_types(&self) -> Vec<QuestionType> {
        QuestionType::unique(&self.question_types)
    }

    /// Custom instructions, if any non-blank text was supplied
    pub fn custom_instructions(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_types: vec![QuestionType::Mcq],
            number_of_questions: 5,
            difficulty_level: Difficulty::Medium,
            custom_prompt: None,
        }
    }
}
