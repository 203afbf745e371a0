//! Analysis request building, dispatch and the scoring service response

pub mod client;
pub mod dispatcher;
pub mod request;
pub mod response;

pub use client::{HttpScoringClient, ScoringClient};
pub use dispatcher::{AnalysisDispatcher, SubmitControl};
pub use request::{AnalysisRequest, AnalysisRequestBuilder};
pub use response::AnalysisResponse;
