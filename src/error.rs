//! Error handling for the ATS match client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsMatchError {
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document parsing error: {0}")]
    ParseFailure(String),

    #[error("Job description is required")]
    MissingJobDescription,

    #[error("Either CV text or a CV file must be provided")]
    MissingCv,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Scoring service returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("An analysis request is already in flight")]
    SubmissionInFlight,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Which stage of the pipeline an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDomain {
    Extraction,
    Validation,
    Dispatch,
    Internal,
}

impl AtsMatchError {
    pub fn domain(&self) -> ErrorDomain {
        match self {
            AtsMatchError::TooLarge { .. }
            | AtsMatchError::UnsupportedFormat(_)
            | AtsMatchError::Io(_)
            | AtsMatchError::ParseFailure(_) => ErrorDomain::Extraction,
            AtsMatchError::MissingJobDescription | AtsMatchError::MissingCv => {
                ErrorDomain::Validation
            }
            AtsMatchError::Transport(_)
            | AtsMatchError::Server { .. }
            | AtsMatchError::SubmissionInFlight => ErrorDomain::Dispatch,
            AtsMatchError::Configuration(_)
            | AtsMatchError::Serialization(_)
            | AtsMatchError::InvalidInput(_)
            | AtsMatchError::OutputFormatting(_) => ErrorDomain::Internal,
        }
    }

    /// One-line notice suitable for showing to the person using the tool.
    pub fn user_notice(&self) -> String {
        match self {
            AtsMatchError::TooLarge { .. } => "File size exceeds 5MB limit".to_string(),
            AtsMatchError::UnsupportedFormat(_) => {
                "Please upload a PDF or Word document".to_string()
            }
            AtsMatchError::Io(_) | AtsMatchError::ParseFailure(_) => {
                "Error processing file. Please try another file or paste text instead.".to_string()
            }
            AtsMatchError::MissingJobDescription => "Please enter a job description".to_string(),
            AtsMatchError::MissingCv => {
                "Please upload a CV file or paste your CV content".to_string()
            }
            AtsMatchError::Transport(_) | AtsMatchError::Server { .. } => {
                "An error occurred during analysis. Please try again.".to_string()
            }
            AtsMatchError::SubmissionInFlight => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtsMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AtsMatchError {
    fn from(err: anyhow::Error) -> Self {
        AtsMatchError::InvalidInput(err.to_string())
    }
}

impl From<reqwest::Error> for AtsMatchError {
    fn from(err: reqwest::Error) -> Self {
        AtsMatchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_domains() {
        let too_large = AtsMatchError::TooLarge { size: 10, limit: 5 };
        assert_eq!(too_large.domain(), ErrorDomain::Extraction);
        assert_eq!(AtsMatchError::MissingCv.domain(), ErrorDomain::Validation);
        assert_eq!(
            AtsMatchError::Server { status: 500, message: "boom".into() }.domain(),
            ErrorDomain::Dispatch
        );
    }

    #[test]
    fn test_user_notices_are_single_line() {
        let errors = vec![
            AtsMatchError::TooLarge { size: 10, limit: 5 },
            AtsMatchError::UnsupportedFormat("notes.txt".into()),
            AtsMatchError::ParseFailure("bad xref".into()),
            AtsMatchError::MissingJobDescription,
            AtsMatchError::MissingCv,
            AtsMatchError::Transport("connection refused".into()),
        ];
        for error in errors {
            assert!(!error.user_notice().contains('\n'));
        }
        assert_eq!(
            AtsMatchError::MissingJobDescription.user_notice(),
            "Please enter a job description"
        );
    }
}
