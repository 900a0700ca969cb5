//! # AppError
//!
//! Centralized error handling for the Rusty-Forum engine.
//! Lookup misses, rejected drafts and persistence failures each get their own variant
//! so callers can tell "nothing matched" apart from "something broke".

use thiserror::Error;

/// The primary error type for all rf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Draft or intent rejected (e.g., empty author, no topic selected)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Snapshot could not be encoded or decoded
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence provider failure (e.g., disk full, permission denied)
    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn post_not_found(id: impl ToString) -> Self {
        AppError::NotFound("Post".to_string(), id.to_string())
    }

    pub fn comment_not_found(id: impl ToString) -> Self {
        AppError::NotFound("Comment".to_string(), id.to_string())
    }

    /// True for lookup misses, which leave every collection untouched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(..))
    }
}

/// A specialized Result type for Rusty-Forum logic.
pub type Result<T> = std::result::Result<T, AppError>;
