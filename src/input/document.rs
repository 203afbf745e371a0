//! CV document structures

use crate::error::Result;
use crate::input::file_detector::{check_size, media_type_for_path};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// A CV file picked by the user, with the metadata the picker reported.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    media_type: String,
    size_bytes: u64,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size_bytes = bytes.len() as u64;
        Self::with_size(name, media_type, size_bytes, bytes)
    }

    /// Build a file whose reported size comes from metadata rather than the buffer.
    pub fn with_size(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            bytes,
        }
    }

    /// Read a local file. The media type is inferred from the extension.
    /// Files over the upload limit are rejected from their metadata alone.
    pub async fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).await?;
        check_size(metadata.len())?;

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, media_type_for_path(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// The CV as it will be sent: either pasted text or the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvDocument<'a> {
    TypedText(&'a str),
    UploadedFile(&'a UploadedFile),
}

/// Whitespace separated word count of the trimmed text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("  5 years Go,\nKubernetes  "), 4);
    }

    #[test]
    fn test_debug_omits_bytes() {
        let file = UploadedFile::new("cv.pdf", "application/pdf", vec![1, 2, 3]);
        let rendered = format!("{:?}", file);
        assert!(rendered.contains("cv.pdf"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }

    #[tokio::test]
    async fn test_read_infers_media_type() {
        let mut temp = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        temp.write_all(b"PK fake").unwrap();

        let file = UploadedFile::read(temp.path()).await.unwrap();
        assert_eq!(file.media_type(), crate::input::file_detector::DOCX_MEDIA_TYPE);
        assert_eq!(file.size_bytes(), 7);
        assert!(file.name().ends_with(".docx"));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let result = UploadedFile::read(Path::new("tests/fixtures/does-not-exist.pdf")).await;
        assert!(matches!(result, Err(crate::error::AtsMatchError::Io(_))));
    }

    #[tokio::test]
    async fn test_read_rejects_oversized_file_before_loading() {
        let temp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        temp.as_file()
            .set_len(crate::input::file_detector::MAX_UPLOAD_BYTES + 1)
            .unwrap();

        let result = UploadedFile::read(temp.path()).await;
        assert!(matches!(
            result,
            Err(crate::error::AtsMatchError::TooLarge { size, .. })
                if size == crate::input::file_detector::MAX_UPLOAD_BYTES + 1
        ));
    }
}
