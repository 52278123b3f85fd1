//! Repository Traits
//!
//! Interfaces for credential checks and operator persistence.
//! Implementations are in the infrastructure layer.

use crate::domain::entity::operator::{Operator, OperatorProfile};
use crate::error::AuthResult;

/// Source of truth for usernames and passwords.
///
/// Swapping the static table for a real identity store only requires a new
/// implementation; token issuing and role checks do not change.
#[trait_variant::make(CredentialProvider: Send)]
pub trait LocalCredentialProvider {
    /// Check a username/password pair.
    ///
    /// `Ok(None)` means the pair is wrong; errors are reserved for the
    /// provider itself failing.
    async fn verify(&self, username: &str, password: &str) -> AuthResult<Option<OperatorProfile>>;
}

/// Operator repository trait
#[trait_variant::make(OperatorRepository: Send)]
pub trait LocalOperatorRepository {
    /// Insert the operator unless a row with the same id exists.
    /// Returns `true` when a row was inserted.
    async fn ensure_exists(&self, operator: &Operator) -> AuthResult<bool>;
}
