//! The JSON envelope every route answers with.
//!
//! `{"status": "...", "message": "...", "data": ..., "count": ...}` where
//! `data` and `count` are omitted when a route has nothing to carry. Field
//! names are part of the wire contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Value of the envelope's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// A known resource was missing or the store failed.
    Error,
    /// The request itself was unusable, or no route matched.
    False,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
            count: None,
        }
    }
}

impl Envelope {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
            count: None,
        }
    }

    pub fn counted(message: impl Into<String>, count: u64) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
            count: Some(count),
        }
    }

    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            count: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
