//! Render `go test -json` logs as a static HTML report.
//!
//! The pipeline is:
//!
//! 1. [`decode`] turns each log line into an [`model::Event`]
//! 2. [`aggregate`] folds the events into a [`model::Summary`]
//! 3. [`format`] renders the summary into an HTML document
//! 4. [`output`] writes the document to `<prefix>_<OS>_results.html`

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod output;
pub mod util;

pub use error::{ErrorCode, ReportError, Result, StructuredError};
