//! ATS match client library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod disclaimer;
pub mod error;
pub mod input;
pub mod output;
pub mod session;

pub use config::Config;
pub use error::{AtsMatchError, ErrorDomain, Result};
pub use session::AnalysisSession;
