//! Input processing module
//! Handles CV file validation, text extraction and input mode bookkeeping

pub mod capability;
pub mod controller;
pub mod document;
pub mod file_detector;
pub mod job_source;
pub mod text_extractor;

pub use controller::{CvState, InputModeController, Surface};
pub use document::{word_count, CvDocument, UploadedFile};
pub use file_detector::FileFormat;
pub use text_extractor::TextExtractor;
