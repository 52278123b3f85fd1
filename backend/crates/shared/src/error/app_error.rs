//! Application Error
//!
//! [`AppError`] is what every domain error becomes right before it is
//! rendered. It carries a kind, a client-facing detail message and an
//! optional cause that is only ever logged.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error.
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::BadRequest, "note is required");
/// assert_eq!(err.status_code(), 400);
/// assert_eq!(err.message(), "note is required");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Keep the underlying error for logs. It never reaches the client.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_status() {
        assert_eq!(AppError::bad_request("note is required").status_code(), 400);
        assert_eq!(AppError::not_found("Capture not found").status_code(), 404);
        assert_eq!(AppError::conflict("Capture already voided").status_code(), 409);
        assert_eq!(AppError::internal("boom").status_code(), 500);
        assert_eq!(AppError::service_unavailable("Database is busy").status_code(), 503);
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full");
        let err = AppError::internal("Failed to store image").with_source(io_err);

        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "[Internal Server Error] Failed to store image");
        assert!(format!("{err:?}").contains("disk full"));
    }

    #[test]
    fn test_display_uses_reason_phrase() {
        let err = AppError::new(ErrorKind::Forbidden, "Not enough permissions");
        assert_eq!(err.to_string(), "[Forbidden] Not enough permissions");
    }
}
