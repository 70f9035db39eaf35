//! Structured error output for the driver.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Context for debugging

use crate::error::SweepError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Storage Errors (exit code 2) ===
    /// No repetitions at the expected location
    NotFound,
    /// Record row could not be decoded
    ParseError,
    /// Record header lacks a required column
    MissingColumn,

    // === Analysis Errors (exit code 3) ===
    InvalidInput,
    InsufficientData,

    // === Config Errors (exit code 7) ===
    ConfigError,

    // === I/O Errors (exit code 8) ===
    IoError,
    JsonError,
    YamlError,

    // === Internal Errors (exit code 1) ===
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ParseError => "PARSE_ERROR",
            Self::MissingColumn => "MISSING_COLUMN",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Storage errors
    /// - 3: Analysis errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound | Self::ParseError | Self::MissingColumn => 2,
            Self::InvalidInput | Self::InsufficientData => 3,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `SweepError`.
    #[must_use]
    pub fn from_error(err: &SweepError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);

        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &SweepError) -> (ErrorCode, Option<Value>) {
        match err {
            SweepError::NotFound { path } => (
                ErrorCode::NotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            SweepError::Parse { path, line, reason } => (
                ErrorCode::ParseError,
                Some(json!({
                    "path": path.display().to_string(),
                    "line": line,
                    "reason": reason,
                })),
            ),
            SweepError::MissingColumn { path, column } => (
                ErrorCode::MissingColumn,
                Some(json!({"path": path.display().to_string(), "column": column})),
            ),
            SweepError::InvalidInput { reason } => {
                (ErrorCode::InvalidInput, Some(json!({"reason": reason})))
            }
            SweepError::InsufficientData { reason } => {
                (ErrorCode::InsufficientData, Some(json!({"reason": reason})))
            }
            SweepError::Config(_) => (ErrorCode::ConfigError, None),
            SweepError::Io(_) => (ErrorCode::IoError, None),
            SweepError::Json(_) => (ErrorCode::JsonError, None),
            SweepError::Yaml(_) => (ErrorCode::YamlError, None),
            SweepError::Other(_) => (ErrorCode::InternalError, None),
        }
    }
}
