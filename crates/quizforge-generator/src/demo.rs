//! Built-in demonstration questions
//!
//! Served for every type when no backend credential is configured, and for
//! a single type when its live generation fails. The content is fixed: it
//! ignores the document, the requested count and the difficulty.

use quizforge_domain::{GenerationBatch, Question, QuestionType};

/// Demonstration questions for one type
pub fn demo_questions(question_type: QuestionType) -> Vec<Question> {
    match question_type {
        QuestionType::Mcq => vec![
            mcq(
                "1",
                "What is the capital of France?",
                &["London", "Berlin", "Paris", "Madrid"],
                "Paris",
            ),
            mcq(
                "2",
                "Which planet is known as the Red Planet?",
                &["Venus", "Mars", "Jupiter", "Saturn"],
                "Mars",
            ),
            mcq(
                "3",
                "Who wrote \"Romeo and Juliet\"?",
                &["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
                "William Shakespeare",
            ),
        ],
        QuestionType::FillInBlanks => vec![
            plain(
                "1",
                question_type,
                "The process of plants making their own food using sunlight is called _______.",
                "photosynthesis",
            ),
            plain(
                "2",
                question_type,
                "Water boils at _______ degrees Celsius at sea level.",
                "100",
            ),
        ],
        QuestionType::TrueFalse => vec![
            plain(
                "1",
                question_type,
                "The Great Wall of China is visible from space.",
                "false",
            ),
            plain(
                "2",
                question_type,
                "The Pacific Ocean is the largest ocean on Earth.",
                "true",
            ),
        ],
        QuestionType::ShortAnswer => vec![
            plain(
                "1",
                question_type,
                "Explain the concept of gravity in your own words.",
                "Gravity is the force that attracts objects toward one another, particularly the force that attracts objects toward the center of the Earth.",
            ),
            plain(
                "2",
                question_type,
                "What are the main causes of climate change?",
                "The main causes of climate change include greenhouse gas emissions, deforestation, and industrial processes.",
            ),
        ],
    }
}

/// Demonstration questions for all four types
pub fn demo_batch() -> GenerationBatch {
    QuestionType::ALL
        .into_iter()
        .map(|question_type| (question_type, demo_questions(question_type)))
        .collect()
}

fn mcq(id: &str, text: &str, options: &[&str], answer: &str) -> Question {
    Question::normalized(
        id,
        QuestionType::Mcq,
        text,
        Some(options.iter().map(|o| o.to_string()).collect()),
        Some(answer.to_string()),
    )
}

fn plain(id: &str, question_type: QuestionType, text: &str, answer: &str) -> Question {
    Question::normalized(id, question_type, text, None, Some(answer.to_string()))
}
