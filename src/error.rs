//! Unified error hierarchy for rehabrs
//!
//! Decision logic (mode selection, trends, dosage, plans) is total and never
//! returns these errors. They cover the I/O edges: configuration, history
//! persistence, region lookups and report validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::models::Region;

/// Top-level error type for all rehabrs operations
#[derive(Debug, Error)]
pub enum RehabError {
    /// History store errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Readiness report or session data failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No capability set registered for the region
    #[error("No profile registered for region {region}")]
    UnknownRegion { region: Region },

    /// Exercise id missing from the region catalog
    #[error("Unknown exercise '{exercise_id}' for region {region}")]
    UnknownExercise { region: Region, exercise_id: String },
}

/// History store specific errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// History file could not be read
    #[error("Failed to read history file {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// History file could not be written
    #[error("Failed to write history file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Result type alias for rehabrs operations
pub type Result<T> = std::result::Result<T, RehabError>;

impl RehabError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RehabError::Validation(_) => ErrorSeverity::Warning,
            RehabError::UnknownExercise { .. } => ErrorSeverity::Warning,
            RehabError::UnknownRegion { .. } => ErrorSeverity::Error,
            RehabError::History(_) => ErrorSeverity::Error,
            RehabError::Configuration(_) => ErrorSeverity::Error,
            RehabError::Serialization(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RehabError::History(HistoryError::ReadFailed { path, .. }) => {
                format!("Could not read your history file: {}", path.display())
            }
            RehabError::UnknownRegion { region } => {
                format!("No exercise program is available for the {} yet.", region)
            }
            RehabError::UnknownExercise { exercise_id, .. } => {
                format!("'{}' is not part of this program.", exercise_id)
            }
            RehabError::Validation(reason) => format!("Please check your answers: {}", reason),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error, data may be unusable
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
