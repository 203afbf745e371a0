//! CV input mode bookkeeping
//!
//! The CV comes either from pasted text or from an uploaded file, never
//! both. Extraction results are matched to the upload that started them;
//! results for an upload that has since been replaced or removed are dropped.

use crate::error::Result;
use crate::input::document::{CvDocument, UploadedFile};
use crate::input::file_detector::{self, FileFormat};
use crate::input::text_extractor::TextExtractor;
use log::{debug, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum CvState {
    Empty,
    TypedText(String),
    File {
        file: Arc<UploadedFile>,
        format: FileFormat,
        /// `None` while extraction is still running.
        extracted: Option<String>,
    },
}

/// Which input surface is shown. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    TypedText,
    FileInfo,
}

/// Handle for an in-flight extraction started by [`InputModeController::begin_file`].
#[derive(Debug)]
pub struct ExtractionTicket {
    generation: u64,
    format: FileFormat,
    file: Arc<UploadedFile>,
}

impl ExtractionTicket {
    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn file(&self) -> &UploadedFile {
        &self.file
    }
}

#[derive(Debug)]
pub struct InputModeController {
    state: CvState,
    generation: u64,
}

impl InputModeController {
    pub fn new() -> Self {
        Self {
            state: CvState::Empty,
            generation: 0,
        }
    }

    pub fn state(&self) -> &CvState {
        &self.state
    }

    pub fn visible_surface(&self) -> Surface {
        match self.state {
            CvState::File { .. } => Surface::FileInfo,
            CvState::Empty | CvState::TypedText(_) => Surface::TypedText,
        }
    }

    /// Replace the CV with typed text, dropping any selected file.
    pub fn set_typed_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.invalidate_extraction();

        self.state = if text.trim().is_empty() {
            CvState::Empty
        } else {
            CvState::TypedText(text)
        };
    }

    /// Validate a file and make it the CV source. Prior state is untouched
    /// when validation fails.
    pub fn begin_file(&mut self, file: UploadedFile) -> Result<ExtractionTicket> {
        let format = file_detector::validate(&file)?;
        let file = Arc::new(file);

        self.generation += 1;
        self.state = CvState::File {
            file: Arc::clone(&file),
            format,
            extracted: None,
        };
        info!("Selected {} file: {}", format.label(), file.name());

        Ok(ExtractionTicket {
            generation: self.generation,
            format,
            file,
        })
    }

    /// Apply the outcome of an extraction. A failure clears the file
    /// selection; stale tickets are ignored.
    pub fn finish_extraction(
        &mut self,
        ticket: ExtractionTicket,
        result: Result<String>,
    ) -> Result<()> {
        if ticket.generation != self.generation {
            debug!("Discarding stale extraction for {}", ticket.file.name());
            return Ok(());
        }

        match result {
            Ok(text) => {
                if let CvState::File { extracted, .. } = &mut self.state {
                    *extracted = Some(text);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Extraction failed for {}: {}", ticket.file.name(), e);
                self.remove_file();
                Err(e)
            }
        }
    }

    /// Select a file and extract its text in one go.
    pub async fn set_file(&mut self, file: UploadedFile, extractor: &TextExtractor) -> Result<()> {
        let ticket = self.begin_file(file)?;
        let result = extractor.extract(ticket.file(), ticket.format()).await;
        self.finish_extraction(ticket, result)
    }

    /// Drop the file and any text extracted from it.
    pub fn remove_file(&mut self) {
        self.invalidate_extraction();
        self.state = CvState::Empty;
    }

    /// Switch back to the typed-text surface. Text already extracted from
    /// the file stays in place as editable typed text.
    pub fn toggle_to_typed_text(&mut self) {
        if let CvState::File { extracted, .. } = &mut self.state {
            let carried = extracted.take().filter(|text| !text.trim().is_empty());
            self.invalidate_extraction();
            self.state = match carried {
                Some(text) => CvState::TypedText(text),
                None => CvState::Empty,
            };
        }
    }

    /// The CV text that analysis would see; empty while nothing is available.
    pub fn resolved_text(&self) -> &str {
        match &self.state {
            CvState::TypedText(text) => text.as_str(),
            CvState::File {
                extracted: Some(text),
                ..
            } => text.as_str(),
            _ => "",
        }
    }

    pub fn pending_file(&self) -> Option<&UploadedFile> {
        match &self.state {
            CvState::File { file, .. } => Some(file.as_ref()),
            _ => None,
        }
    }

    /// The CV to send. A selected file always takes precedence over text,
    /// including text that was extracted from it.
    pub fn document(&self) -> Option<CvDocument<'_>> {
        match &self.state {
            CvState::File { file, .. } => Some(CvDocument::UploadedFile(file.as_ref())),
            CvState::TypedText(text) => Some(CvDocument::TypedText(text.as_str())),
            CvState::Empty => None,
        }
    }

    pub fn is_extracting(&self) -> bool {
        matches!(self.state, CvState::File { extracted: None, .. })
    }

    fn invalidate_extraction(&mut self) {
        if matches!(self.state, CvState::File { .. }) {
            self.generation += 1;
        }
    }
}

impl Default for InputModeController {
    fn default() -> Self {
        Self::new()
    }
}
