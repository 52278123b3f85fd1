//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Operators, roles, repository traits
//! - `application/` - Sign-in use case, token service, role gate
//! - `infra/` - Static credential table and SQLite operator store
//! - `presentation/` - `POST /token`, bearer middleware, DTOs
//!
//! ## Security Model
//! - Stateless HS256 bearer tokens, valid for one week
//! - Every token failure is the same 401; the cause is only logged
//! - Role checks happen per route through [`CurrentOperator::require_any`]

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{TokenClaims, TokenService};
pub use domain::{Operator, OperatorId, OperatorProfile, OperatorRole};
pub use error::{AuthError, AuthResult};
pub use infra::{SqliteOperatorRepository, StaticAccount, StaticCredentialProvider};
pub use presentation::middleware::{BearerAuthState, CurrentOperator, require_bearer};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
