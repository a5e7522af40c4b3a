//! Error types for dispatch queue operations.

use thiserror::Error;

/// Errors that can occur when submitting records to the queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Record is missing a required field (`command` or `priority`).
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Record is not a key/value object.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Record carries a priority that is not an integer.
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

/// Result type alias for dispatch queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
