//! Source file - the uploaded document handed to the extractor

use crate::ContentError;
use std::path::Path;

/// Media type used when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

/// An uploaded document: bytes plus the name and media type it was declared with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Wrap in-memory content
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, declaring its media type from the suffix
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] if the file cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for(&name);

        Ok(Self::new(name, media_type, bytes))
    }

    /// File name without directories
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type, possibly empty
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Raw content
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased name suffix after the last dot
    pub fn suffix(&self) -> Option<String> {
        suffix_of(&self.name)
    }
}

fn suffix_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Infer a media type from a file name's suffix
pub fn media_type_for(name: &str) -> &'static str {
    match suffix_of(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_media_type_inference() {
        assert_eq!(media_type_for("notes.PDF"), "application/pdf");
        assert_eq!(media_type_for("scan.jpeg"), "image/jpeg");
        assert!(media_type_for("essay.docx").contains("wordprocessingml"));
        assert_eq!(media_type_for("readme.md"), "text/markdown");
        assert_eq!(media_type_for("archive.tar.gz"), OCTET_STREAM);
        assert_eq!(media_type_for("Makefile"), OCTET_STREAM);
        assert_eq!(media_type_for("trailing."), OCTET_STREAM);
    }

    #[test]
    fn test_suffix() {
        let file = SourceFile::new("Chapter.One.TXT", "", Vec::new());
        assert_eq!(file.suffix().as_deref(), Some("txt"));
        assert_eq!(SourceFile::new("noext", "", Vec::new()).suffix(), None);
    }

    #[tokio::test]
    async fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"Paris is the capital of France.").unwrap();

        let file = SourceFile::open(&path).await.unwrap();
        assert_eq!(file.name(), "lesson.txt");
        assert_eq!(file.media_type(), "text/plain");
        assert_eq!(file.size(), 31);
        assert_eq!(file.bytes(), b"Paris is the capital of France.");
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceFile::open(dir.path().join("missing.pdf")).await;
        assert!(matches!(result, Err(ContentError::Io(_))));
    }
}
