//! Static Credential Provider
//!
//! In-memory account table. Passwords are compared in constant time.

use platform::crypto::constant_time_eq;

use crate::domain::entity::operator::OperatorProfile;
use crate::domain::repository::CredentialProvider;
use crate::domain::value_object::operator_role::OperatorRole;
use crate::error::AuthResult;

/// One login account
#[derive(Debug, Clone)]
pub struct StaticAccount {
    pub username: String,
    pub password: String,
    pub operator_id: String,
    pub name: String,
    pub role: OperatorRole,
}

impl StaticAccount {
    /// Account whose operator id equals its username
    pub fn new(username: &str, password: &str, name: &str, role: OperatorRole) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            operator_id: username.to_string(),
            name: name.to_string(),
            role,
        }
    }
}

/// Credential provider backed by a fixed list of accounts
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    accounts: Vec<StaticAccount>,
}

impl StaticCredentialProvider {
    pub fn new(accounts: Vec<StaticAccount>) -> Self {
        Self { accounts }
    }

    /// The three warehouse accounts
    pub fn warehouse_defaults() -> Self {
        Self::new(vec![
            StaticAccount::new("admin", "admin", "Administrador", OperatorRole::Admin),
            StaticAccount::new("bodega", "bodega2025", "Bodega", OperatorRole::Bodega),
            StaticAccount::new(
                "callcenter",
                "callcenter123",
                "Call Center",
                OperatorRole::CallCenter,
            ),
        ])
    }
}

impl CredentialProvider for StaticCredentialProvider {
    async fn verify(&self, username: &str, password: &str) -> AuthResult<Option<OperatorProfile>> {
        let Some(account) = self.accounts.iter().find(|a| a.username == username) else {
            return Ok(None);
        };

        if !constant_time_eq(account.password.as_bytes(), password.as_bytes()) {
            return Ok(None);
        }

        Ok(Some(OperatorProfile::new(
            account.operator_id.as_str(),
            account.name.as_str(),
            account.role,
        )))
    }
}
