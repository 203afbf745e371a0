//! Results presentation

use crate::analysis::response::AnalysisResponse;
use crate::error::{AtsMatchError, Result};
use crate::output::formatter::OutputFormatter;
use log::debug;
use std::io::Write;

/// Receives a completed match report. Only called for successful analyses.
pub trait ResultsPresenter {
    fn present(&mut self, response: &AnalysisResponse) -> Result<()>;
}

/// Formats the report and writes it out, e.g. to stdout.
pub struct WriterPresenter<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    writer: W,
}

impl<W: Write> WriterPresenter<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, writer: W) -> Self {
        Self { formatter, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultsPresenter for WriterPresenter<W> {
    fn present(&mut self, response: &AnalysisResponse) -> Result<()> {
        debug!("Rendering {:?} report", self.formatter.supports_format());
        let rendered = self.formatter.format_response(response)?;
        writeln!(self.writer, "{}", rendered)
            .and_then(|_| self.writer.flush())
            .map_err(|e| AtsMatchError::OutputFormatting(format!("Failed to write report: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::formatter::JsonFormatter;

    #[test]
    fn test_writer_presenter_writes_formatted_report() {
        let response = AnalysisResponse {
            match_percentage: 42.0,
            matched_keywords: vec![],
            missing_keywords: vec!["Rust".into()],
            matched_skills: vec![],
            missing_skills: vec![],
            optimization_tips: vec![],
            detected_industry: None,
        };

        let mut presenter = WriterPresenter::new(Box::new(JsonFormatter::new(false)), Vec::new());
        presenter.present(&response).unwrap();

        let written = String::from_utf8(presenter.into_inner()).unwrap();
        let decoded: AnalysisResponse = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(decoded, response);
    }
}
