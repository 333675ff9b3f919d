//! Error types for the task list.

use thiserror::Error;

/// Longest task text accepted, in UTF-16 code units after trimming.
pub const MAX_TEXT_CHARS: usize = 200;

/// Main error type for storage and repository operations.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Task list is locked by another process")]
    Locked,

    #[error("Task list not initialized")]
    NotInitialized,

    #[error("Invalid storage format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected task text. Raised before anything reaches storage.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a todo item")]
    Empty,

    #[error("Todo must be less than {} characters (got {len})", MAX_TEXT_CHARS)]
    TooLong { len: usize },
}

impl From<serde_json::Error> for TaskError {
    fn from(e: serde_json::Error) -> Self {
        TaskError::Serialization(e.to_string())
    }
}

/// Result type for task list operations.
pub type Result<T> = std::result::Result<T, TaskError>;
