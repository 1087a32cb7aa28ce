//! QuizForge Content Extraction
//!
//! Turns an uploaded document into raw text for question generation.
//!
//! # Strategies
//!
//! - PDF: page text via `lopdf`
//! - Images and Word documents: pluggable readers, placeholders by default
//! - Text: decoded verbatim
//! - Unknown: decoded when possible, otherwise described
//!
//! Only PDF parsing can fail; every other strategy always yields some text.
//!
//! # Examples
//!
//! ```
//! use quizforge_content::{ContentExtractor, SourceFile};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let file = SourceFile::new("notes.txt", "text/plain", b"Paris is the capital of France.".to_vec());
//! let text = runtime.block_on(ContentExtractor::new().extract(&file)).unwrap();
//! assert_eq!(text, "Paris is the capital of France.");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod extractor;
pub mod pdf;
pub mod source;

pub use error::ContentError;
pub use extractor::{
    ContentExtractor, ContentKind, DocumentReader, ImageReader, PlaceholderDocumentReader,
    PlaceholderImageReader,
};
pub use source::{media_type_for, SourceFile};
