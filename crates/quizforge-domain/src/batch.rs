//! Generation batch - every requested format's questions from one run

use crate::question::{Question, QuestionType};
use std::collections::BTreeMap;

/// Mapping from question format to its ordered question list
///
/// Held for the lifetime of a quiz session so the user can switch formats
/// without regenerating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationBatch {
    questions: BTreeMap<QuestionType, Vec<Question>>,
}

impl GenerationBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the questions for a format, returning any previous list
    pub fn insert(&mut self, question_type: QuestionType, questions: Vec<Question>) -> Option<Vec<Question>> {
        self.questions.insert(question_type, questions)
    }

    /// Questions for a format
    pub fn get(&self, question_type: QuestionType) -> Option<&[Question]> {
        self.questions.get(&question_type).map(Vec::as_slice)
    }

    /// Mutable access to a format's questions
    pub fn get_mut(&mut self, question_type: QuestionType) -> Option<&mut Vec<Question>> {
        self.questions.get_mut(&question_type)
    }

    /// Whether the batch holds an entry for a format
    pub fn contains(&self, question_type: QuestionType) -> bool {
        self.questions.contains_key(&question_type)
    }

    /// Formats present, in display order
    pub fn types(&self) -> Vec<QuestionType> {
        self.questions.keys().copied().collect()
    }

    /// Number of formats present
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when no format is present
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate formats and their questions
    pub fn iter(&self) -> impl Iterator<Item = (QuestionType, &[Question])> {
        self.questions.iter().map(|(t, qs)| (*t, qs.as_slice()))
    }
}

impl FromIterator<(QuestionType, Vec<Question>)> for GenerationBatch {
    fn from_iter<I: IntoIterator<Item = (QuestionType, Vec<Question>)>>(iter: I) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GenerationBatch {
    type Item = (QuestionType, Vec<Question>);
    type IntoIter = std::collections::btree_map::IntoIter<QuestionType, Vec<Question>>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}
