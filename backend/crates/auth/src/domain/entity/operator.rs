//! Operator Entity
//!
//! People using the system. Rows are created lazily on first login.

use crate::domain::value_object::{operator_id::OperatorId, operator_role::OperatorRole};

/// Identity established by a credential check or a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorProfile {
    pub id: OperatorId,
    /// Display name
    pub name: String,
    pub role: OperatorRole,
}

impl OperatorProfile {
    pub fn new(id: impl Into<OperatorId>, name: impl Into<String>, role: OperatorRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}

/// Persisted operator record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: OperatorId,
    pub name: String,
    pub role: OperatorRole,
    pub active: bool,
}

impl Operator {
    /// New active operator for a verified profile
    pub fn from_profile(profile: &OperatorProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            role: profile.role,
            active: true,
        }
    }
}
