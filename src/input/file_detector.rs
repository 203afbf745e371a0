//! File type detection and upload validation

use crate::error::{AtsMatchError, Result};
use crate::input::document::UploadedFile;
use std::path::Path;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOC_MEDIA_TYPE: &str = "application/msword";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Hard ceiling on uploaded CV files (5 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Word,
    Unsupported,
}

impl FileFormat {
    /// Classify by declared media type first, then by filename extension.
    pub fn classify(media_type: &str, file_name: &str) -> Self {
        let name = file_name.to_lowercase();

        if media_type == PDF_MEDIA_TYPE || name.ends_with(".pdf") {
            FileFormat::Pdf
        } else if media_type == DOC_MEDIA_TYPE
            || media_type == DOCX_MEDIA_TYPE
            || name.ends_with(".doc")
            || name.ends_with(".docx")
        {
            FileFormat::Word
        } else {
            FileFormat::Unsupported
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "PDF",
            FileFormat::Word => "Word",
            FileFormat::Unsupported => "unsupported",
        }
    }
}

pub fn check_size(size_bytes: u64) -> Result<()> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(AtsMatchError::TooLarge {
            size: size_bytes,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Size check, then format check. Never touches the file contents.
pub fn validate(file: &UploadedFile) -> Result<FileFormat> {
    check_size(file.size_bytes())?;

    match FileFormat::classify(file.media_type(), file.name()) {
        FileFormat::Unsupported => Err(AtsMatchError::UnsupportedFormat(format!(
            "{} ({})",
            file.name(),
            file.media_type()
        ))),
        format => Ok(format),
    }
}

/// Declared media type for a local file, the way a browser would report it.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("doc") => DOC_MEDIA_TYPE,
        Some("docx") => DOCX_MEDIA_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_by_extension_any_case() {
        for name in ["cv.pdf", "CV.PDF", "resume.Pdf"] {
            assert_eq!(FileFormat::classify("", name), FileFormat::Pdf);
        }
    }

    #[test]
    fn test_pdf_by_media_type() {
        assert_eq!(FileFormat::classify(PDF_MEDIA_TYPE, "upload.bin"), FileFormat::Pdf);
    }

    #[test]
    fn test_word_by_extension_and_media_type() {
        assert_eq!(FileFormat::classify("", "cv.DOCX"), FileFormat::Word);
        assert_eq!(FileFormat::classify("", "cv.doc"), FileFormat::Word);
        assert_eq!(FileFormat::classify(DOC_MEDIA_TYPE, "cv"), FileFormat::Word);
        assert_eq!(FileFormat::classify(DOCX_MEDIA_TYPE, "cv"), FileFormat::Word);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(FileFormat::classify("text/plain", "cv.txt"), FileFormat::Unsupported);
        assert_eq!(FileFormat::classify("", "pdf"), FileFormat::Unsupported);
        assert_eq!(FileFormat::classify("", "cv.docx.txt"), FileFormat::Unsupported);
    }

    #[test]
    fn test_size_ceiling() {
        assert!(check_size(MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            check_size(MAX_UPLOAD_BYTES + 1),
            Err(AtsMatchError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_checks_size_before_format() {
        let file = UploadedFile::with_size("notes.txt", "text/plain", MAX_UPLOAD_BYTES + 1, Vec::new());
        assert!(matches!(validate(&file), Err(AtsMatchError::TooLarge { .. })));

        let file = UploadedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(validate(&file), Err(AtsMatchError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a/b/cv.PDF")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("cv.docx")), DOCX_MEDIA_TYPE);
        assert_eq!(media_type_for_path(Path::new("cv")), FALLBACK_MEDIA_TYPE);
    }
}
