//! Question module - the unit a quiz is made of

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Question format requested from the generator and rendered by the UI
///
/// Variants are declared in display order; `Ord` follows that order so
/// batches iterate formats consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// Multiple choice with four options
    #[serde(rename = "mcq")]
    Mcq,

    /// Sentence with a blank to fill in
    #[serde(rename = "fillInBlanks")]
    FillInBlanks,

    /// Statement judged true or false
    #[serde(rename = "trueFalse")]
    TrueFalse,

    /// Open question answered in a few sentences
    #[serde(rename = "shortAnswer")]
    ShortAnswer,
}

impl QuestionType {
    /// Every supported format, in display order
    pub const ALL: [QuestionType; 4] = [
        QuestionType::Mcq,
        QuestionType::FillInBlanks,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
    ];

    /// Wire identifier (`mcq`, `fillInBlanks`, `trueFalse`, `shortAnswer`)
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::FillInBlanks => "fillInBlanks",
            QuestionType::TrueFalse => "trueFalse",
            QuestionType::ShortAnswer => "shortAnswer",
        }
    }

    /// Formats with duplicates removed, first occurrence wins
    pub fn unique<'a>(types: impl IntoIterator<Item = &'a QuestionType>) -> Vec<QuestionType> {
        let mut seen = Vec::new();
        for question_type in types {
            if !seen.contains(question_type) {
                seen.push(*question_type);
            }
        }
        seen
    }

    /// Phrase used when asking the model for this format
    pub fn prompt_phrase(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "multiple choice",
            QuestionType::FillInBlanks => "fill in the blanks",
            QuestionType::TrueFalse => "true/false",
            QuestionType::ShortAnswer => "short answer",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "Multiple Choice",
            QuestionType::FillInBlanks => "Fill in the Blanks",
            QuestionType::TrueFalse => "True or False",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }

    /// Parse a format from its wire id, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mcq" => Some(QuestionType::Mcq),
            "fillinblanks" => Some(QuestionType::FillInBlanks),
            "truefalse" => Some(QuestionType::TrueFalse),
            "shortanswer" => Some(QuestionType::ShortAnswer),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid question type: {}", s))
    }
}

/// Errors raised when a question would break the options/type invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestionError {
    /// A multiple choice question was built without options
    #[error("question {0}: multiple choice questions require options")]
    MissingOptions(String),

    /// Options were supplied for a format that does not use them
    #[error("question {id}: options are only allowed for mcq, not {question_type}")]
    UnexpectedOptions {
        /// Question id
        id: String,
        /// Format the question was declared as
        question_type: QuestionType,
    },
}

/// Format-specific payload of a question
///
/// Options live inside the multiple choice variant, so a non-mcq
/// question cannot carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Multiple choice, with ordered options
    MultipleChoice {
        /// Choices shown to the user, in order
        options: Vec<String>,
    },
    /// Fill in the blank
    FillInBlanks,
    /// True or false
    TrueFalse,
    /// Short answer
    ShortAnswer,
}

impl QuestionKind {
    /// Format tag of this payload
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::MultipleChoice { .. } => QuestionType::Mcq,
            QuestionKind::FillInBlanks => QuestionType::FillInBlanks,
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::ShortAnswer => QuestionType::ShortAnswer,
        }
    }
}

/// A single quiz question
///
/// Created at batch-generation time; only `user_answer` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    id: String,
    kind: QuestionKind,
    text: String,
    answer: Option<String>,
    user_answer: Option<String>,
}

impl Question {
    /// Create a question, checking that `options` is present iff the type is mcq
    ///
    /// # Examples
    ///
    /// ```
    /// use quizforge_domain::{Question, QuestionType};
    ///
    /// let q = Question::new(
    ///     "1",
    ///     QuestionType::TrueFalse,
    ///     "The sky is green.",
    ///     None,
    ///     Some("false".to_string()),
    /// ).unwrap();
    /// assert!(q.options().is_none());
    ///
    /// let bad = Question::new("2", QuestionType::Mcq, "Pick one", None, None);
    /// assert!(bad.is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        question_type: QuestionType,
        text: impl Into<String>,
        options: Option<Vec<String>>,
        answer: Option<String>,
    ) -> Result<Self, QuestionError> {
        let id = id.into();
        let kind = match (question_type, options) {
            (QuestionType::Mcq, Some(options)) => QuestionKind::MultipleChoice { options },
            (QuestionType::Mcq, None) => return Err(QuestionError::MissingOptions(id)),
            (question_type, Some(_)) => {
                return Err(QuestionError::UnexpectedOptions { id, question_type })
            }
            (QuestionType::FillInBlanks, None) => QuestionKind::FillInBlanks,
            (QuestionType::TrueFalse, None) => QuestionKind::TrueFalse,
            (QuestionType::ShortAnswer, None) => QuestionKind::ShortAnswer,
        };

        Ok(Self {
            id,
            kind,
            text: text.into(),
            answer,
            user_answer: None,
        })
    }

    /// Build a question from loosely shaped input, coercing it onto the invariant
    ///
    /// Stray options on non-mcq formats are dropped and an mcq question with
    /// no options gets an empty list.
    pub fn normalized(
        id: impl Into<String>,
        question_type: QuestionType,
        text: impl Into<String>,
        options: Option<Vec<String>>,
        answer: Option<String>,
    ) -> Self {
        let kind = match question_type {
            QuestionType::Mcq => QuestionKind::MultipleChoice {
                options: options.unwrap_or_default(),
            },
            QuestionType::FillInBlanks => QuestionKind::FillInBlanks,
            QuestionType::TrueFalse => QuestionKind::TrueFalse,
            QuestionType::ShortAnswer => QuestionKind::ShortAnswer,
        };

        Self {
            id: id.into(),
            kind,
            text: text.into(),
            answer,
            user_answer: None,
        }
    }

    /// Identifier, unique within a generation batch
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Format of this question
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Format-specific payload
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Question text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options, present only for multiple choice
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        }
    }

    /// Reference answer
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// The user's response, if any
    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer.as_deref()
    }

    /// Record the user's response
    pub fn set_user_answer(&mut self, answer: impl Into<String>) {
        self.user_answer = Some(answer.into());
    }

    /// Forget the user's response
    pub fn clear_user_answer(&mut self) {
        self.user_answer = None;
    }

    /// Whether the user's response matches the reference answer exactly
    ///
    /// Case-sensitive, no trimming. An unanswered question is never correct.
    pub fn is_correct(&self) -> bool {
        match (&self.user_answer, &self.answer) {
            (Some(given), Some(expected)) => given == expected,
            _ => false,
        }
    }
}

/// Flat wire shape: `{id, type, text, options?, answer?, userAnswer?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_answer: Option<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let mut question = Question::new(
            record.id,
            record.question_type,
            record.text,
            record.options,
            record.answer,
        )?;
        question.user_answer = record.user_answer;
        Ok(question)
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        let question_type = question.question_type();
        let options = match question.kind {
            QuestionKind::MultipleChoice { options } => Some(options),
            _ => None,
        };
        Self {
            id: question.id,
            question_type,
            text: question.text,
            options,
            answer: question.answer,
            user_answer: question.user_answer,
        }
    }
}
