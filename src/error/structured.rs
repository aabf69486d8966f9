//! Structured error output.
//!
//! Attaches a stable error code, an optional hint, and debugging context to
//! a [`ReportError`] so CI logs can be grepped by code.

use crate::error::ReportError;
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed log line
    DecodeError,
    /// Log had no events
    EmptyInput,
    /// A package reported no subtests
    IntegrityError,
    /// Document template could not be composed
    TemplateError,
    /// Configuration error
    ConfigError,
    /// File I/O error
    IoError,
}

impl ErrorCode {
    /// Code as written to the log.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DecodeError => "DECODE_ERROR",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::IntegrityError => "INTEGRITY_ERROR",
            Self::TemplateError => "TEMPLATE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }
}

/// Structured error with code, hint, and context.
#[derive(Debug, Clone)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    pub hint: Option<String>,
    /// Additional context data, logged alongside the code
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `ReportError`.
    #[must_use]
    pub fn from_error(err: &ReportError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);

        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            context,
        }
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            // Red for error
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                // Yellow for hint
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &ReportError) -> (ErrorCode, Option<Value>) {
        match err {
            ReportError::Decode { line, .. } => {
                (ErrorCode::DecodeError, Some(json!({"line": line})))
            }
            ReportError::EmptyInput => (ErrorCode::EmptyInput, None),
            ReportError::Integrity { package } => {
                (ErrorCode::IntegrityError, Some(json!({"package": package})))
            }
            ReportError::Template(_) | ReportError::Render(_) => (ErrorCode::TemplateError, None),
            ReportError::MissingSlot(slot) => {
                (ErrorCode::TemplateError, Some(json!({"slot": slot})))
            }
            ReportError::Config(_) | ReportError::Yaml(_) => (ErrorCode::ConfigError, None),
            ReportError::Io(_) => (ErrorCode::IoError, None),
            ReportError::IoAt { path, .. } => (
                ErrorCode::IoError,
                Some(json!({"path": path.display().to_string()})),
            ),
        }
    }
}
