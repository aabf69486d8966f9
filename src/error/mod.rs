//! Error types and handling for `go_test_html_report`.
//!
//! Every error is terminal: the report is either produced whole or not at
//! all.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Provides recovery hints for user-facing errors
//! - Exits with code 1 for every failure kind

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    // === Input Errors ===
    /// A log line is not well-formed JSON.
    #[error("Failed to decode test log at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The log contained no events, so no first/last timestamp exists.
    #[error("Test log is empty: no events to report")]
    EmptyInput,

    // === Integrity Errors ===
    /// A package reported no subtest outcomes.
    #[error("Test run failed: package '{package}' has no subtest results")]
    Integrity { package: String },

    // === Template Errors ===
    /// The document template does not parse.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// The document template failed to render.
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The document template never emits a required slot.
    #[error("Template error: missing slot '{{{{{0}}}}}'")]
    MissingSlot(&'static str),

    // === Configuration Errors ===
    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error on '{path}': {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Wrap an I/O error with the path that produced it.
    #[must_use]
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Decode { .. } => Some("Generate the log with: go test -json ./..."),
            Self::EmptyInput => Some("Pass a log with --file or pipe go test -json output"),
            Self::Integrity { .. } => {
                Some("Every test must log at least one subtest result line")
            }
            Self::Render(_) | Self::MissingSlot(_) => Some(
                "A template may only use {{failed_tests}}, {{passed_tests}}, {{skipped_tests}}, \
                 {{total_test_time}}, {{test_date}} and {{{html_elements}}}, each at least once",
            ),
            Self::Yaml(_) => Some("Check .go-test-html-report.yaml syntax"),
            Self::IoAt { .. } => Some("Check the path exists and is readable"),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    ///
    /// Every failure kind exits with 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type using `ReportError`.
pub type Result<T> = std::result::Result<T, ReportError>;
