//! Error types for the todo store and service.
//!
//! # Design
//! Not-found is not an error at the store level: lookups return `Ok(None)`
//! and the service turns that into `TodoError::NotFound`. `StoreError` is
//! reserved for the backend failing outright, which the server reports as a
//! 500 without exposing the cause.

use thiserror::Error;

use crate::types::TodoId;

/// Failures raised by a `TodoStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver reported a failure.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document could not be turned back into a `Todo`.
    #[error("corrupt document: {0}")]
    Corrupt(String),
}

/// Errors returned by `TodoService` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The request body or query parameters were unusable.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No item exists with the given id.
    #[error("todo not found: {0}")]
    NotFound(String),

    /// The store failed while handling the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TodoError {
    pub fn not_found(id: &TodoId) -> Self {
        Self::NotFound(id.to_string())
    }
}
