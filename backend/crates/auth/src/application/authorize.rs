//! Role gate

use crate::domain::entity::operator::OperatorProfile;
use crate::domain::value_object::operator_role::OperatorRole;
use crate::error::{AuthError, AuthResult};

/// Allow the request only when the operator's role is in `allowed`.
pub fn authorize(operator: &OperatorProfile, allowed: &[OperatorRole]) -> AuthResult<()> {
    if allowed.contains(&operator.role) {
        Ok(())
    } else {
        tracing::debug!(
            operator_id = %operator.id,
            role = %operator.role,
            "Role not allowed"
        );
        Err(AuthError::Forbidden)
    }
}
