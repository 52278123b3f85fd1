//! Capture Error Types
//!
//! This module provides capture-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Capture-specific result type alias
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Capture-specific error variants
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Missing or malformed input field
    #[error("{0}")]
    Validation(String),

    /// Malformed multipart body
    #[error("Invalid multipart body: {0}")]
    Multipart(String),

    /// Request body exceeded the configured limit
    #[error("Upload too large")]
    PayloadTooLarge,

    /// Capture id unknown or malformed
    #[error("Capture not found")]
    NotFound,

    /// Capture was already voided
    #[error("Capture already voided")]
    AlreadyVoided,

    /// Image file could not be written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Authentication / authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CaptureError {
    pub fn validation(message: impl Into<String>) -> Self {
        CaptureError::Validation(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CaptureError::Validation(_) | CaptureError::Multipart(_) => StatusCode::BAD_REQUEST,
            CaptureError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            CaptureError::NotFound => StatusCode::NOT_FOUND,
            CaptureError::AlreadyVoided => StatusCode::CONFLICT,
            CaptureError::Auth(e) => e.status_code(),
            CaptureError::Storage(_) | CaptureError::Database(_) | CaptureError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::Validation(_) | CaptureError::Multipart(_) => ErrorKind::BadRequest,
            CaptureError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            CaptureError::NotFound => ErrorKind::NotFound,
            CaptureError::AlreadyVoided => ErrorKind::Conflict,
            CaptureError::Auth(e) => e.kind(),
            CaptureError::Storage(_) | CaptureError::Database(_) | CaptureError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError without leaking internal details
    pub fn into_app_error(self) -> AppError {
        match self {
            CaptureError::Database(e) => AppError::from(e),
            CaptureError::Auth(e) => e.into_app_error(),
            CaptureError::Storage(_) => AppError::internal("Failed to store image"),
            CaptureError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CaptureError::Database(e) => {
                tracing::error!(error = %e, "Capture database error");
            }
            CaptureError::Storage(e) => {
                tracing::error!(error = %e, "Capture storage error");
            }
            CaptureError::Internal(msg) => {
                tracing::error!(message = %msg, "Capture internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Capture error");
            }
        }
    }
}

impl From<MultipartError> for CaptureError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CaptureError::PayloadTooLarge
        } else {
            CaptureError::Multipart(err.body_text())
        }
    }
}

impl From<MultipartRejection> for CaptureError {
    fn from(err: MultipartRejection) -> Self {
        CaptureError::Multipart(err.body_text())
    }
}

impl IntoResponse for CaptureError {
    fn into_response(self) -> Response {
        match self {
            // Keeps the bearer challenge header
            CaptureError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.into_app_error().into_response()
            }
        }
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        err.into_app_error()
    }
}

/// Watermark rendering failure. Never surfaced to clients; the upload falls
/// back to the original image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No watermark font loaded")]
    FontUnavailable,

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Render task failed: {0}")]
    Task(String),
}
