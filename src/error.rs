//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    // Business rule violations
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Persistence errors, surfaced unchanged
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // Server errors (5xx)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to when no usecase chose one
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::InvalidPositionId) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Domain(DomainError::InvalidSecretId) => StatusCode::FORBIDDEN,

            AppError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Repository(RepositoryError::InsufficientBalance) => StatusCode::BAD_REQUEST,
            AppError::Repository(RepositoryError::InvalidAmount(_)) => StatusCode::BAD_REQUEST,
            AppError::Repository(RepositoryError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable code for the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Domain(err) => err.code(),
            AppError::Repository(RepositoryError::NotFound { .. }) => "not_found",
            AppError::Repository(RepositoryError::InsufficientBalance) => "insufficient_balance",
            AppError::Repository(RepositoryError::InvalidAmount(_)) => "invalid_amount",
            AppError::Repository(RepositoryError::Database(_)) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Render this error with an explicit status code.
    ///
    /// Server-side details are logged and kept out of the body.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        let details = match &self {
            AppError::Repository(RepositoryError::InvalidAmount(msg)) => Some(msg.clone()),
            AppError::Repository(RepositoryError::NotFound { entity, id }) => {
                Some(format!("{} {}", entity, id))
            }
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!("{} error: {:?}", self.error_code(), self);
        }

        let error = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: self.error_code().to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.into_response_with_status(status)
    }
}
