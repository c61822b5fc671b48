//! API error type and its JSON rendering.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

/// Errors a handler can answer with.
///
/// The `Display` text is exactly what the client sees in the `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was absent or empty.
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("An admin already exists. Only one admin is allowed.")]
    AdminAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid status")]
    InvalidStatus,

    /// The body could not be read as a JSON object.
    #[error("{0}")]
    MalformedBody(String),

    #[error("Not found")]
    NotFound,

    /// Store failure whose message is passed through to the client.
    #[error("{0}")]
    StoreFault(String),

    /// Store failure hidden behind a generic message; the cause is logged.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_) | ApiError::InvalidStatus | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail | ApiError::DuplicateUsername | ApiError::AdminAlreadyExists => {
                StatusCode::CONFLICT
            }
            ApiError::StoreFault(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::StoreFault(cause) | ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "Store operation failed");
            }
            _ => tracing::debug!(status = status.as_u16(), error = %self, "Request rejected"),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}
