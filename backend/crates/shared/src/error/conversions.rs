//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from infrastructure errors to [`AppError`]
//! and the HTTP rendering of [`AppError`].

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a SQLite extended result code.
///
/// <https://www.sqlite.org/rescode.html>
#[cfg(feature = "sqlx")]
fn classify_sqlite_code(code: &str) -> AppError {
    match code {
        // SQLITE_CONSTRAINT_PRIMARYKEY / SQLITE_CONSTRAINT_UNIQUE
        "1555" | "2067" => AppError::conflict("Duplicate key value"),
        // SQLITE_CONSTRAINT_FOREIGNKEY
        "787" => AppError::conflict("Foreign key violation"),
        // SQLITE_CONSTRAINT_NOTNULL
        "1299" => AppError::bad_request("Required field is null"),
        // SQLITE_CONSTRAINT_CHECK
        "275" => AppError::bad_request("Check constraint violation"),
        // SQLITE_BUSY / SQLITE_LOCKED and their extended codes
        "5" | "6" | "261" | "517" | "262" => {
            AppError::service_unavailable("Database is busy")
        }
        // SQLITE_FULL
        "13" => AppError::service_unavailable("Database storage is full"),
        _ => AppError::internal("Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.code() {
                    Some(code) => classify_sqlite_code(code.as_ref()),
                    None => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            sqlx::Error::Migrate(_) => {
                AppError::internal("Database migration error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}


#[cfg(all(test, feature = "axum"))]
mod axum_tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::response::IntoResponse;

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorKind::Forbidden, "Not enough permissions").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);

        let response = AppError::bad_request("note is required").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
