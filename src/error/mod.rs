//! Error types and handling for `sweep_stats`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Storage and parse failures are fatal for the enclosing sweep
//! - Statistical degeneracies are NOT errors; they travel inside results
//! - Provides recovery hints and structured JSON output for the driver

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `sweep_stats` operations.
#[derive(Error, Debug)]
pub enum SweepError {
    // === Storage Errors ===
    /// Expected storage location has no repetitions (or does not exist).
    #[error("No repetitions found at '{path}'")]
    NotFound { path: PathBuf },

    /// A record row could not be decoded.
    #[error("Parse error in '{path}' at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A record file lacks a required column.
    #[error("Missing column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    // === Analysis Errors ===
    /// Caller supplied inputs that cannot be analysed as asked.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Too few samples for a whole-result computation (e.g. a regression).
    #[error("Insufficient data: {reason}")]
    InsufficientData { reason: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SweepError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Parse { .. }
                | Self::MissingColumn { .. }
                | Self::InvalidInput { .. }
                | Self::Config(_)
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Regenerate the missing run or check --data-root and --version-tag")
            }
            Self::Parse { .. } | Self::MissingColumn { .. } => {
                Some("The record file is corrupt; regenerate that repetition")
            }
            Self::InsufficientData { .. } => Some("Record more runs before fitting"),
            Self::Config(_) => Some("Check sweep-stats.yaml and SWEEP_STATS_* variables"),
            _ => None,
        }
    }

    /// Create a parse error for one line of a file.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type using `SweepError`.
pub type Result<T> = std::result::Result<T, SweepError>;
