//! Text extraction from uploaded CV files
//!
//! PDF and Word parsing backends are loaded lazily through
//! [`LazyCapability`]; parsing itself runs on the blocking pool, one step
//! at a time, and any failing step fails the whole extraction.

use crate::error::{AtsMatchError, Result};
use crate::input::capability::{CapabilityLoader, CapabilityState, LazyCapability};
use crate::input::document::UploadedFile;
use crate::input::file_detector::FileFormat;
use async_trait::async_trait;
use dotext::{Docx, MsDoc};
use log::{debug, info};
use std::io::{Read, Write};
use std::sync::{Arc, OnceLock};

/// Opens PDF byte buffers.
pub trait PdfParser: Send + Sync {
    fn open(&self, bytes: Vec<u8>) -> Result<Arc<dyn PdfDocument>>;
}

/// An opened, multi-page PDF. Page numbers are 1-indexed.
pub trait PdfDocument: Send + Sync {
    fn page_count(&self) -> u32;
    fn page_tokens(&self, page_number: u32) -> Result<Vec<String>>;
}

/// Pulls raw text out of a Word document, discarding formatting.
pub trait WordParser: Send + Sync {
    fn extract_raw_text(&self, bytes: Vec<u8>) -> Result<String>;
}

pub struct LopdfParser;

struct LopdfDocument {
    inner: lopdf::Document,
    page_count: u32,
}

impl PdfParser for LopdfParser {
    fn open(&self, bytes: Vec<u8>) -> Result<Arc<dyn PdfDocument>> {
        let inner = lopdf::Document::load_mem(&bytes).map_err(|e| {
            AtsMatchError::ParseFailure(format!("Failed to open PDF: {}", e))
        })?;

        if inner.is_encrypted() {
            return Err(AtsMatchError::ParseFailure(
                "Encrypted PDF documents are not supported".to_string(),
            ));
        }

        let page_count = inner.get_pages().len() as u32;
        Ok(Arc::new(LopdfDocument { inner, page_count }))
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_tokens(&self, page_number: u32) -> Result<Vec<String>> {
        let text = self.inner.extract_text(&[page_number]).map_err(|e| {
            AtsMatchError::ParseFailure(format!(
                "Failed to extract text from page {}: {}",
                page_number, e
            ))
        })?;

        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

pub struct DotextWordParser;

impl WordParser for DotextWordParser {
    fn extract_raw_text(&self, bytes: Vec<u8>) -> Result<String> {
        // dotext only opens paths, so stage the buffer in a temp file
        let mut staged = tempfile::Builder::new()
            .prefix("ats-match-")
            .suffix(".docx")
            .tempfile()?;
        staged.write_all(&bytes)?;
        staged.flush()?;

        let mut document = Docx::open(staged.path()).map_err(|e| {
            AtsMatchError::ParseFailure(format!("Failed to open Word document: {}", e))
        })?;

        let mut text = String::new();
        document.read_to_string(&mut text).map_err(|e| {
            AtsMatchError::ParseFailure(format!("Failed to read Word document: {}", e))
        })?;
        Ok(text)
    }
}

pub struct LopdfLoader;

#[async_trait]
impl CapabilityLoader<dyn PdfParser> for LopdfLoader {
    async fn load(&self) -> Result<Arc<dyn PdfParser>> {
        Ok(Arc::new(LopdfParser))
    }
}

pub struct DotextLoader;

#[async_trait]
impl CapabilityLoader<dyn WordParser> for DotextLoader {
    async fn load(&self) -> Result<Arc<dyn WordParser>> {
        Ok(Arc::new(DotextWordParser))
    }
}

pub struct TextExtractor {
    pdf: LazyCapability<dyn PdfParser>,
    word: LazyCapability<dyn WordParser>,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::with_loaders(Box::new(LopdfLoader), Box::new(DotextLoader))
    }

    pub fn with_loaders(
        pdf_loader: Box<dyn CapabilityLoader<dyn PdfParser>>,
        word_loader: Box<dyn CapabilityLoader<dyn WordParser>>,
    ) -> Self {
        Self {
            pdf: LazyCapability::new("PDF", pdf_loader),
            word: LazyCapability::new("Word", word_loader),
        }
    }

    /// Process-wide extractor; its capabilities are loaded at most once.
    pub fn shared() -> Arc<TextExtractor> {
        static EXTRACTOR: OnceLock<Arc<TextExtractor>> = OnceLock::new();
        Arc::clone(EXTRACTOR.get_or_init(|| Arc::new(TextExtractor::new())))
    }

    pub async fn extract(&self, file: &UploadedFile, format: FileFormat) -> Result<String> {
        let text = match format {
            FileFormat::Pdf => {
                info!("Extracting text from PDF: {}", file.name());
                self.extract_pdf(file.bytes().to_vec()).await?
            }
            FileFormat::Word => {
                info!("Extracting text from Word document: {}", file.name());
                self.extract_word(file.bytes().to_vec()).await?
            }
            FileFormat::Unsupported => {
                return Err(AtsMatchError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    file.name()
                )));
            }
        };

        info!("Extracted {} characters from {}", text.chars().count(), file.name());
        Ok(text)
    }

    pub fn pdf_state(&self) -> CapabilityState {
        self.pdf.state()
    }

    pub fn word_state(&self) -> CapabilityState {
        self.word.state()
    }

    pub fn pdf_load_count(&self) -> usize {
        self.pdf.load_count()
    }

    async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<String> {
        let parser = self.pdf.get().await?;
        let document = run_blocking(move || parser.open(bytes)).await?;

        let page_count = document.page_count();
        debug!("PDF opened with {} pages", page_count);

        let mut pages = Vec::with_capacity(page_count as usize);
        for page_number in 1..=page_count {
            let page = Arc::clone(&document);
            let tokens = run_blocking(move || page.page_tokens(page_number)).await?;
            pages.push(tokens.join(" "));
        }

        Ok(pages.join("\n"))
    }

    async fn extract_word(&self, bytes: Vec<u8>) -> Result<String> {
        let parser = self.word.get().await?;
        run_blocking(move || parser.extract_raw_text(bytes)).await
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_blocking<T, F>(step: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(step)
        .await
        .map_err(|e| AtsMatchError::ParseFailure(format!("Extraction task failed: {}", e)))?
}
