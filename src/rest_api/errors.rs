//! # REST API Errors
//!
//! Error types for the butterfly endpoints and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::validation::FieldError;

use super::response::Envelope;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message returned in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// One or more field rules failed
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Body is not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id is not an integer
    #[error("Invalid butterfly id: {0}")]
    InvalidId(String),

    /// No record with the requested id
    #[error("Butterfly not found")]
    NotFound,

    /// Uniqueness constraint violated
    #[error("{0}")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body for this error. Internal details are not echoed.
    pub fn envelope(&self) -> Envelope<()> {
        match self {
            ApiError::Validation(errors) => {
                Envelope::failure(self.to_string()).with_errors(errors.clone())
            }
            ApiError::Internal(_) => Envelope::failure(INTERNAL_ERROR_MESSAGE),
            _ => Envelope::failure(self.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::NotFound,
            RepositoryError::DuplicateScientificName(_) => ApiError::Conflict(err.to_string()),
            RepositoryError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }
        (status, Json(self.envelope())).into_response()
    }
}
