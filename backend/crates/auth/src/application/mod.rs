//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod sign_in;
pub mod token;

// Re-exports
pub use authorize::authorize;
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use token::{TokenClaims, TokenService};
