//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Malformed or out-of-bounds input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Wrong current password or admin pin
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Username already taken
    #[error("Username already taken")]
    UsernameTaken,

    /// Credential not found
    #[error("Credential not found")]
    NotFound,

    /// Missing or unverifiable bearer token
    #[error("Invalid authentication token")]
    TokenInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Validation(_) => StatusCode::BAD_REQUEST,
            IdentityError::InvalidCredentials | IdentityError::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            IdentityError::UsernameTaken => StatusCode::CONFLICT,
            IdentityError::NotFound => StatusCode::NOT_FOUND,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::BadRequest,
            IdentityError::InvalidCredentials | IdentityError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            IdentityError::UsernameTaken => ErrorKind::Conflict,
            IdentityError::NotFound => ErrorKind::NotFound,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Storage and internal failures are surfaced as an opaque message;
    /// details stay in the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login or credential update attempt");
            }
            IdentityError::TokenInvalid => {
                tracing::warn!("Request with invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}
