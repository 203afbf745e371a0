//! One analysis session: the job description, the CV input and submission

use crate::analysis::client::ScoringClient;
use crate::analysis::dispatcher::{AnalysisDispatcher, SubmitControl};
use crate::analysis::request::AnalysisRequestBuilder;
use crate::error::Result;
use crate::input::controller::InputModeController;
use crate::input::document::{word_count, UploadedFile};
use crate::input::text_extractor::TextExtractor;
use crate::output::presenter::ResultsPresenter;
use std::sync::Arc;

pub struct AnalysisSession {
    job_description: String,
    cv: InputModeController,
    extractor: Arc<TextExtractor>,
    dispatcher: AnalysisDispatcher,
}

impl AnalysisSession {
    pub fn new(client: Arc<dyn ScoringClient>, extractor: Arc<TextExtractor>) -> Self {
        Self {
            job_description: String::new(),
            cv: InputModeController::new(),
            extractor,
            dispatcher: AnalysisDispatcher::new(client),
        }
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn cv(&self) -> &InputModeController {
        &self.cv
    }

    pub fn cv_mut(&mut self) -> &mut InputModeController {
        &mut self.cv
    }

    pub fn submit_control(&self) -> &SubmitControl {
        self.dispatcher.control()
    }

    /// Select a CV file and extract its text. On failure the file selection
    /// is cleared and the error is returned for display.
    pub async fn upload(&mut self, file: UploadedFile) -> Result<()> {
        self.cv.set_file(file, &self.extractor).await
    }

    /// Validate, send, and hand the report to `presenter`. Nothing is
    /// presented when any step fails.
    pub async fn submit(&self, presenter: &mut dyn ResultsPresenter) -> Result<()> {
        let request = AnalysisRequestBuilder::build(&self.job_description, &self.cv)?;
        let response = self.dispatcher.dispatch(&request).await?;
        presenter.present(&response)
    }

    /// Clear both the job description and the CV.
    pub fn reset(&mut self) {
        self.job_description.clear();
        self.cv.remove_file();
    }

    pub fn job_description_word_count(&self) -> usize {
        word_count(&self.job_description)
    }

    pub fn cv_word_count(&self) -> usize {
        word_count(self.cv.resolved_text())
    }
}
