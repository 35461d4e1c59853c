//! Central mapping from failures to status codes and envelopes.
//!
//! # Design
//! Handlers never pick a status code for a failure themselves. They tag a
//! `TodoError` with the `Operation` that produced it and return `ApiError`;
//! `IntoResponse` below is the only place that decides 400 / 404 / 500.
//! Store failures are logged with their cause and answered with a fixed
//! operation-specific message.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::{StoreError, TodoError};

use crate::envelope::{Envelope, Status};

/// Generic message for any unusable body or query, deliberately unspecific.
pub const INVALID_INPUT_MESSAGE: &str = "參數或待辦項目錯誤 / invalid parameter or todo item";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "route not found";

/// The route-level operation a request maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPage,
    Create,
    Update,
    Delete,
    DeleteAll,
    Count,
}

impl Operation {
    pub fn not_found_message(self) -> &'static str {
        match self {
            Self::Update => "todo not found or update failed",
            Self::Delete => "todo not found or delete failed",
            _ => "todo not found",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::ListPage => "failed to fetch todos from the store",
            Self::Create => "failed to create todo",
            Self::Update => "error while updating todo",
            Self::Delete => "error while deleting todo",
            Self::DeleteAll => "error while deleting all todos",
            Self::Count => "failed to count todos",
        }
    }

    /// Attach this operation to a service error.
    pub fn error(self, err: TodoError) -> ApiError {
        match err {
            TodoError::Validation(detail) => ApiError::InvalidInput(detail),
            TodoError::NotFound(id) => ApiError::NotFound { op: self, id },
            TodoError::Store(source) => ApiError::Store { op: self, source },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListPage => "list_page",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::DeleteAll => "delete_all",
            Self::Count => "count",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, missing title or bad page query.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no route matched")]
    RouteNotFound,

    #[error("{op}: todo {id} not found")]
    NotFound { op: Operation, id: String },

    #[error("{op}: {source}")]
    Store {
        op: Operation,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = match &self {
            ApiError::InvalidInput(detail) => {
                tracing::debug!(%detail, "rejected request input");
                Envelope::failure(Status::False, INVALID_INPUT_MESSAGE)
            }
            ApiError::RouteNotFound => Envelope::failure(Status::False, ROUTE_NOT_FOUND_MESSAGE),
            ApiError::NotFound { op, .. } => {
                Envelope::failure(Status::Error, op.not_found_message())
            }
            ApiError::Store { op, source } => {
                tracing::error!(operation = %op, error = %source, "store operation failed");
                Envelope::failure(Status::Error, op.failure_message())
            }
        };
        (status, Json(envelope)).into_response()
    }
}
