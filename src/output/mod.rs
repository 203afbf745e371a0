//! Report rendering

pub mod formatter;
pub mod presenter;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter};
pub use presenter::{ResultsPresenter, WriterPresenter};
