//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::operator_role::OperatorRole;

// ============================================================================
// Token
// ============================================================================

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
    pub operator_id: String,
    pub operator_name: String,
    pub role: OperatorRole,
}

impl LoginResponse {
    pub const TOKEN_TYPE: &'static str = "bearer";
}
