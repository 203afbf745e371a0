//! Analysis request assembly and validation

use crate::error::{AtsMatchError, Result};
use crate::input::controller::InputModeController;
use crate::input::document::{CvDocument, UploadedFile};
use crate::input::file_detector::FALLBACK_MEDIA_TYPE;
use log::warn;
use reqwest::multipart::{Form, Part};

pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
pub const CV_FILE_FIELD: &str = "cvFile";
pub const CV_CONTENT_FIELD: &str = "cvContent";

/// A validated request. Borrows the CV from the controller that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRequest<'a> {
    job_description: &'a str,
    cv: CvDocument<'a>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn job_description(&self) -> &'a str {
        self.job_description
    }

    pub fn cv(&self) -> CvDocument<'a> {
        self.cv
    }

    /// Multipart body: `jobDescription` plus either `cvFile` or `cvContent`.
    pub fn to_form(&self) -> Result<Form> {
        let form = Form::new().text(JOB_DESCRIPTION_FIELD, self.job_description.to_string());

        let form = match self.cv {
            CvDocument::UploadedFile(file) => form.part(CV_FILE_FIELD, file_part(file)?),
            CvDocument::TypedText(text) => form.text(CV_CONTENT_FIELD, text.to_string()),
        };

        Ok(form)
    }
}

/// The original file as a multipart part. A declared media type that is
/// blank or does not parse is sent as generic binary instead.
fn file_part(file: &UploadedFile) -> Result<Part> {
    let part = || Part::bytes(file.bytes().to_vec()).file_name(file.name().to_string());
    let declared = file.media_type();

    if !declared.is_empty() {
        match part().mime_str(declared) {
            Ok(part) => return Ok(part),
            Err(e) => warn!(
                "Sending {} as {}; declared media type '{}' is invalid: {}",
                file.name(),
                FALLBACK_MEDIA_TYPE,
                declared,
                e
            ),
        }
    }

    part().mime_str(FALLBACK_MEDIA_TYPE).map_err(|e| {
        AtsMatchError::InvalidInput(format!("Invalid media type '{}': {}", FALLBACK_MEDIA_TYPE, e))
    })
}

pub struct AnalysisRequestBuilder;

impl AnalysisRequestBuilder {
    /// Validate the inputs and assemble a request.
    ///
    /// A selected file always wins over text: if the controller holds a
    /// file, the file itself is sent even when its text has already been
    /// extracted. Typed text is sent trimmed.
    pub fn build<'a>(
        job_description: &'a str,
        cv: &'a InputModeController,
    ) -> Result<AnalysisRequest<'a>> {
        let job_description = job_description.trim();
        if job_description.is_empty() {
            return Err(AtsMatchError::MissingJobDescription);
        }

        let cv = match cv.document() {
            Some(CvDocument::UploadedFile(file)) => CvDocument::UploadedFile(file),
            Some(CvDocument::TypedText(text)) if !text.trim().is_empty() => {
                CvDocument::TypedText(text.trim())
            }
            _ => return Err(AtsMatchError::MissingCv),
        };

        Ok(AnalysisRequest {
            job_description,
            cv,
        })
    }
}
