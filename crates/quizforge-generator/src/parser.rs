//! Parse LLM output into questions

use crate::error::GenerationError;
use quizforge_domain::{Question, QuestionType};
use serde_json::Value;
use tracing::warn;

/// Parse an LLM response into questions of one type
///
/// Ids are 1-based positions. Missing `text` and `answer` become empty
/// strings; `options` are kept only when present.
///
/// # Errors
///
/// - [`GenerationError::Parse`] if the response is not valid JSON
/// - [`GenerationError::Format`] if the top-level value is not an array
pub fn parse_questions(
    response: &str,
    question_type: QuestionType,
) -> Result<Vec<Question>, GenerationError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)?;

    let items = json.as_array().ok_or_else(|| {
        GenerationError::Format(format!("Expected JSON array, got {}", kind_of(&json)))
    })?;

    Ok(items
        .iter()
        .enumerate()
        .map(|(idx, item)| normalize(idx, item, question_type))
        .collect())
}

/// Strip a surrounding markdown code fence, if any
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (```json) up to the first newline
    let body = match fenced.find('\n') {
        Some(pos) => &fenced[pos + 1..],
        None => fenced,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn normalize(idx: usize, item: &Value, question_type: QuestionType) -> Question {
    if !item.is_object() {
        warn!(index = idx, "Question item is not a JSON object");
    }

    let text = item.get("text").and_then(scalar_string).unwrap_or_default();
    let answer = item.get("answer").and_then(scalar_string).unwrap_or_default();
    let options = item.get("options").and_then(Value::as_array).map(|options| {
        options.iter().filter_map(scalar_string).collect::<Vec<_>>()
    });

    if options.is_some() && question_type != QuestionType::Mcq {
        warn!(index = idx, %question_type, "Dropping options on non multiple choice question");
    }

    Question::normalized((idx + 1).to_string(), question_type, text, options, Some(answer))
}

/// Strings as-is, numbers and booleans in their JSON spelling
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
