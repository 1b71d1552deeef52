//! Error types for QCut.

use thiserror::Error;

/// Main error type for QCut operations.
///
/// The time and keyframe math never produces these; they surface from file
/// handling and configuration at the edges of the workspace.
#[derive(Error, Debug)]
pub enum QCutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for QCut operations.
pub type Result<T> = std::result::Result<T, QCutError>;
