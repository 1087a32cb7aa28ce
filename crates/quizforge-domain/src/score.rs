//! Scoring of answered questions

use crate::question::Question;

/// Count questions whose user answer equals the reference answer
///
/// Exact, case-sensitive comparison with no trimming. A question with no
/// user answer never counts.
///
/// # Examples
///
/// ```
/// use quizforge_domain::{score, Question, QuestionType};
///
/// let mut q = Question::new("1", QuestionType::TrueFalse, "S", None, Some("true".into())).unwrap();
/// assert_eq!(score(&[q.clone()]), 0);
/// q.set_user_answer("true");
/// assert_eq!(score(&[q]), 1);
/// assert_eq!(score(&[]), 0);
/// ```
pub fn score(questions: &[Question]) -> usize {
    questions.iter().filter(|q| q.is_correct()).count()
}

/// Summary shown on the results stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    /// Correct answers
    pub score: usize,
    /// Questions answered (or skipped)
    pub total: usize,
    /// Rounded percentage, 0 when there were no questions
    pub percentage: u32,
    /// Encouragement matching the percentage band
    pub feedback: &'static str,
}

impl ScoreReport {
    /// Build a report for an answered question set
    pub fn from_questions(questions: &[Question]) -> Self {
        Self::new(score(questions), questions.len())
    }

    /// Build a report from raw counts
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((score as f64 / total as f64) * 100.0).round() as u32
        };

        let feedback = match percentage {
            80.. => "Excellent work!",
            60..=79 => "Good job!",
            40..=59 => "Keep practicing!",
            _ => "More study needed!",
        };

        Self {
            score,
            total,
            percentage,
            feedback,
        }
    }
}
