//! Shared Kernel
//!
//! Vocabulary every domain crate agrees on:
//! - `AppError` / `ErrorKind`, the single HTTP error shape (RFC 7807 body)
//! - `sqlx` error classification for SQLite (feature `sqlx`)
//! - Typed `Id<T>` wrappers over UUID v4
//!
//! Nothing here knows about captures or operators beyond id markers.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
