//! Infrastructure Layer
//!
//! Credential provider and SQLite repository implementations.

pub mod sqlite;
pub mod static_credentials;

pub use sqlite::SqliteOperatorRepository;
pub use static_credentials::{StaticAccount, StaticCredentialProvider};
