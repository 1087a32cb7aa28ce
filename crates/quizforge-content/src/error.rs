//! Error types for content extraction

use thiserror::Error;

/// Errors that can occur while reading or extracting a document
///
/// Only PDF parsing and file reading can fail; every other strategy
/// degrades to placeholder text.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The PDF could not be parsed
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    /// The file could not be read from disk
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ContentError {
    fn from(e: lopdf::Error) -> Self {
        ContentError::Pdf(e.to_string())
    }
}
