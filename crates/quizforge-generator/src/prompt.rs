//! LLM prompt construction for question generation

use quizforge_domain::{ProfileData, QuestionType, QuizSettings};

/// System message fixing the assistant's role
pub const SYSTEM_PROMPT: &str =
    "You are an expert educator who creates high-quality quiz questions based on document content.";

/// Builds the user prompt for one question type
///
/// Sections appear in a fixed order: format instruction, profile, document,
/// count with output shape, custom instructions. The parser relies on the
/// array-of-objects shape requested here.
pub struct PromptBuilder<'a> {
    text: &'a str,
    question_type: QuestionType,
    settings: &'a QuizSettings,
    profile: Option<&'a ProfileData>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, question_type: QuestionType, settings: &'a QuizSettings) -> Self {
        Self {
            text,
            question_type,
            settings,
            profile: None,
        }
    }

    /// Add the user's profile as context
    pub fn with_profile(mut self, profile: Option<&'a ProfileData>) -> Self {
        self.profile = profile;
        self
    }

    /// Build the complete generation prompt
    pub fn build(&self) -> String {
        let phrase = self.question_type.prompt_phrase();
        let mut prompt = String::new();

        // 1. Format and difficulty
        prompt.push_str(&format!(
            "Generate {} questions based on the following document content.\n",
            phrase
        ));
        prompt.push_str(&format!(
            "The questions should be at the {} difficulty level.\n\n",
            self.settings.difficulty_level
        ));

        // 2. Profile, only the fields that were filled in
        let fields = self.profile.map(ProfileData::filled_fields).unwrap_or_default();
        if !fields.is_empty() {
            prompt.push_str(
                "The questions should be appropriate for someone with the following profile:\n",
            );
            for (label, value) in fields {
                prompt.push_str(&format!("- {}: {}\n", label, value));
            }
            prompt.push('\n');
        }

        // 3. The document, verbatim
        prompt.push_str("DOCUMENT CONTENT:\n");
        prompt.push_str(self.text);
        prompt.push_str("\n\n");

        // 4. Count and output shape
        prompt.push_str(&format!(
            "Please generate {} high-quality {} questions.\n",
            self.settings.number_of_questions, phrase
        ));
        prompt.push_str("Return the questions in the following JSON format:\n");
        prompt.push_str(output_shape(self.question_type));
        prompt.push_str("\n\n");
        prompt.push_str(JSON_ONLY_REMINDER);

        // 5. Custom instructions
        if let Some(custom) = self.settings.custom_instructions() {
            prompt.push_str("\n\nAdditional instructions:\n");
            prompt.push_str(custom);
        }

        prompt
    }
}

fn output_shape(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::Mcq => MCQ_SHAPE,
        QuestionType::FillInBlanks => FILL_IN_BLANKS_SHAPE,
        QuestionType::TrueFalse => TRUE_FALSE_SHAPE,
        QuestionType::ShortAnswer => SHORT_ANSWER_SHAPE,
    }
}

const MCQ_SHAPE: &str = r#"[
  {
    "text": "Question text",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "answer": "Correct option text, copied exactly from options"
  },
  ...
]"#;

const FILL_IN_BLANKS_SHAPE: &str = r#"[
  {
    "text": "Sentence with _______ for the blank",
    "answer": "correct word"
  },
  ...
]"#;

const TRUE_FALSE_SHAPE: &str = r#"[
  {
    "text": "Statement to evaluate as true or false",
    "answer": "true" or "false"
  },
  ...
]"#;

const SHORT_ANSWER_SHAPE: &str = r#"[
  {
    "text": "Question requiring a short answer",
    "answer": "Model answer or key points"
  },
  ...
]"#;

const JSON_ONLY_REMINDER: &str =
    "Remember: Return ONLY the JSON array, no markdown code blocks, no explanations.";
