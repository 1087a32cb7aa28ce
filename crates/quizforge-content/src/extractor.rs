//! Content extractor - picks a strategy per file and produces raw text
//!
//! Dispatch is evaluated in order against the declared media type and the
//! name suffix:
//!
//! 1. PDF: text of every page (the only strategy that can fail)
//! 2. Image: handed to an [`ImageReader`]
//! 3. Word-like: handed to a [`DocumentReader`]
//! 4. Plain text: the bytes decoded as text
//! 5. Anything else: decoded as text if it is text, otherwise a
//!    description of the file

use crate::pdf::extract_pdf_text;
use crate::source::{SourceFile, OCTET_STREAM};
use crate::ContentError;
use async_trait::async_trait;
use tracing::debug;

const IMAGE_SUFFIXES: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];
const WORD_SUFFIXES: &[&str] = &["doc", "docx"];
const WORD_MEDIA_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Extraction strategy chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Portable Document Format
    Pdf,
    /// Raster image
    Image,
    /// Word processor document
    Word,
    /// Plain text
    Text,
    /// Anything else
    Unknown,
}

impl ContentKind {
    /// Classify a file by media type and name suffix
    pub fn classify(file: &SourceFile) -> Self {
        let media_type = file.media_type().to_ascii_lowercase();
        let suffix = file.suffix();
        let suffix = suffix.as_deref();

        if media_type == "application/pdf" || suffix == Some("pdf") {
            ContentKind::Pdf
        } else if media_type.starts_with("image/")
            || suffix.is_some_and(|s| IMAGE_SUFFIXES.contains(&s))
        {
            ContentKind::Image
        } else if WORD_MEDIA_TYPES.contains(&media_type.as_str())
            || suffix.is_some_and(|s| WORD_SUFFIXES.contains(&s))
        {
            ContentKind::Word
        } else if media_type.starts_with("text/") || suffix == Some("txt") {
            ContentKind::Text
        } else {
            ContentKind::Unknown
        }
    }
}

/// Turns an image into text
///
/// The default implementation is a placeholder; an OCR engine can be
/// plugged in with [`ContentExtractor::with_image_reader`].
#[async_trait]
pub trait ImageReader: Send + Sync {
    /// Read the text shown in an image
    async fn read_image(&self, file: &SourceFile) -> Result<String, ContentError>;
}

/// Turns a word-processor document into text
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Read the text of a document
    async fn read_document(&self, file: &SourceFile) -> Result<String, ContentError>;
}

/// Placeholder image reader naming the file
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImageReader;

#[async_trait]
impl ImageReader for PlaceholderImageReader {
    async fn read_image(&self, file: &SourceFile) -> Result<String, ContentError> {
        Ok(format!(
            "[This is a placeholder for OCR text extraction from {}. A production build would run an OCR engine to extract text from this image.]",
            file.name()
        ))
    }
}

/// Placeholder document reader naming the file
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDocumentReader;

#[async_trait]
impl DocumentReader for PlaceholderDocumentReader {
    async fn read_document(&self, file: &SourceFile) -> Result<String, ContentError> {
        Ok(format!(
            "[This is a placeholder for text extraction from {}. A production build would use a document parser to extract text from this Word document.]",
            file.name()
        ))
    }
}

/// Produces raw text from uploaded files
pub struct ContentExtractor {
    image_reader: Box<dyn ImageReader>,
    document_reader: Box<dyn DocumentReader>,
}

impl ContentExtractor {
    /// Extractor with placeholder image and document readers
    pub fn new() -> Self {
        Self {
            image_reader: Box::new(PlaceholderImageReader),
            document_reader: Box::new(PlaceholderDocumentReader),
        }
    }

    /// Replace the image reader
    pub fn with_image_reader(mut self, reader: impl ImageReader + 'static) -> Self {
        self.image_reader = Box::new(reader);
        self
    }

    /// Replace the document reader
    pub fn with_document_reader(mut self, reader: impl DocumentReader + 'static) -> Self {
        self.document_reader = Box::new(reader);
        self
    }

    /// Extract text from a file
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Pdf`] when a PDF cannot be parsed. Placeholder
    /// readers never fail; a custom reader's error is replaced with the
    /// fallback description so non-PDF files always yield text.
    pub async fn extract(&self, file: &SourceFile) -> Result<String, ContentError> {
        let kind = ContentKind::classify(file);
        debug!(file = %file.name(), ?kind, size = file.size(), "Extracting content");

        let reader_result = match kind {
            ContentKind::Pdf => return extract_pdf_text(file.bytes()),
            ContentKind::Text => return Ok(String::from_utf8_lossy(file.bytes()).into_owned()),
            ContentKind::Unknown => return Ok(decode_or_describe(file)),
            ContentKind::Image => self.image_reader.read_image(file).await,
            ContentKind::Word => self.document_reader.read_document(file).await,
        };

        Ok(reader_result.unwrap_or_else(|e| {
            debug!(file = %file.name(), error = %e, "Reader failed, describing file instead");
            describe(file)
        }))
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text if the bytes are text, otherwise a description of the file
fn decode_or_describe(file: &SourceFile) -> String {
    match std::str::from_utf8(file.bytes()) {
        Ok(text) if !text.contains('\0') => text.to_string(),
        _ => describe(file),
    }
}

fn describe(file: &SourceFile) -> String {
    let media_type = if file.media_type().is_empty() {
        OCTET_STREAM
    } else {
        file.media_type()
    };
    format!(
        "[File: {} ({}, {} bytes). The content of this file could not be extracted as text.]",
        file.name(),
        media_type,
        file.size()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: &str, bytes: &[u8]) -> SourceFile {
        SourceFile::new(name, media_type, bytes.to_vec())
    }

    #[test]
    fn test_classify_dispatch_order() {
        assert_eq!(ContentKind::classify(&file("a.pdf", "", b"")), ContentKind::Pdf);
        assert_eq!(ContentKind::classify(&file("a", "application/pdf", b"")), ContentKind::Pdf);
        // Declared PDF wins over an image suffix
        assert_eq!(ContentKind::classify(&file("a.png", "application/pdf", b"")), ContentKind::Pdf);
        assert_eq!(ContentKind::classify(&file("a.JPG", "", b"")), ContentKind::Image);
        assert_eq!(ContentKind::classify(&file("a", "image/heic", b"")), ContentKind::Image);
        assert_eq!(ContentKind::classify(&file("a.docx", "", b"")), ContentKind::Word);
        assert_eq!(
            ContentKind::classify(&file("a", "application/msword", b"")),
            ContentKind::Word
        );
        assert_eq!(ContentKind::classify(&file("a.txt", "", b"")), ContentKind::Text);
        assert_eq!(ContentKind::classify(&file("a.csv", "text/csv", b"")), ContentKind::Text);
        assert_eq!(ContentKind::classify(&file("a.bin", OCTET_STREAM, b"")), ContentKind::Unknown);
    }

    #[tokio::test]
    async fn test_plain_text_is_exact() {
        let extractor = ContentExtractor::new();
        let content = "Paris is the capital of France.\n  Indented\tline\n";
        let text = extractor
            .extract(&file("notes.txt", "text/plain", content.as_bytes()))
            .await
            .unwrap();
        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_image_placeholder_names_file() {
        let extractor = ContentExtractor::new();
        let text = extractor
            .extract(&file("diagram.png", "image/png", &[0x89, 0x50, 0x4e, 0x47]))
            .await
            .unwrap();
        assert!(text.contains("diagram.png"));
        assert!(text.contains("OCR"));
    }

    #[tokio::test]
    async fn test_word_placeholder_names_file() {
        let extractor = ContentExtractor::new();
        let text = extractor
            .extract(&file("essay.docx", "", b"PK\x03\x04"))
            .await
            .unwrap();
        assert!(text.contains("essay.docx"));
        assert!(text.contains("Word document"));
    }

    #[tokio::test]
    async fn test_unknown_text_is_decoded() {
        let extractor = ContentExtractor::new();
        let text = extractor
            .extract(&file("config.ini", OCTET_STREAM, b"[section]\nkey = value"))
            .await
            .unwrap();
        assert_eq!(text, "[section]\nkey = value");
    }

    #[tokio::test]
    async fn test_unknown_binary_is_described() {
        let extractor = ContentExtractor::new();
        let text = extractor
            .extract(&file("blob.bin", "", &[0xff, 0xfe, 0x00, 0x01, 0x02]))
            .await
            .unwrap();
        assert!(text.contains("blob.bin"));
        assert!(text.contains(OCTET_STREAM));
        assert!(text.contains("5 bytes"));
        assert!(text.contains("could not be extracted"));
    }

    #[tokio::test]
    async fn test_nul_bytes_are_not_text() {
        let extractor = ContentExtractor::new();
        let text = extractor
            .extract(&file("data", "application/x-thing", b"ab\0cd"))
            .await
            .unwrap();
        assert!(text.contains("application/x-thing"));
    }

    #[tokio::test]
    async fn test_broken_pdf_fails() {
        let extractor = ContentExtractor::new();
        let result = extractor
            .extract(&file("broken.pdf", "application/pdf", b"%PDF-1.4 garbage"))
            .await;
        assert!(matches!(result, Err(ContentError::Pdf(_))));
    }

    struct FixedOcr;

    #[async_trait]
    impl ImageReader for FixedOcr {
        async fn read_image(&self, _file: &SourceFile) -> Result<String, ContentError> {
            Ok("recognised text".to_string())
        }
    }

    struct BrokenOcr;

    #[async_trait]
    impl ImageReader for BrokenOcr {
        async fn read_image(&self, _file: &SourceFile) -> Result<String, ContentError> {
            Err(ContentError::Io(std::io::Error::other("engine crashed")))
        }
    }

    #[tokio::test]
    async fn test_custom_image_reader() {
        let extractor = ContentExtractor::new().with_image_reader(FixedOcr);
        let text = extractor.extract(&file("scan.jpg", "", b"")).await.unwrap();
        assert_eq!(text, "recognised text");
    }

    #[tokio::test]
    async fn test_failing_reader_degrades_to_description() {
        let extractor = ContentExtractor::new().with_image_reader(BrokenOcr);
        let text = extractor.extract(&file("scan.jpg", "image/jpeg", b"xyz")).await.unwrap();
        assert!(text.contains("scan.jpg"));
        assert!(text.contains("image/jpeg"));
    }
}
