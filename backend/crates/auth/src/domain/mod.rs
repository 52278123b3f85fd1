//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::operator::{Operator, OperatorProfile};
pub use repository::{CredentialProvider, OperatorRepository};
pub use value_object::{operator_id::OperatorId, operator_role::OperatorRole};
