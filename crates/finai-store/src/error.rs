//! Storage error types

use thiserror::Error;

/// Repository operation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;
