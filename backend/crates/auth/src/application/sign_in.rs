//! Sign In Use Case
//!
//! Verifies credentials, records the operator and issues an access token.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::operator::{Operator, OperatorProfile};
use crate::domain::repository::{CredentialProvider, OperatorRepository};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed bearer token
    pub access_token: String,
    pub operator: OperatorProfile,
}

/// Sign in use case
pub struct SignInUseCase<C, R>
where
    C: CredentialProvider,
    R: OperatorRepository,
{
    credentials: Arc<C>,
    operators: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<C, R> SignInUseCase<C, R>
where
    C: CredentialProvider,
    R: OperatorRepository,
{
    pub fn new(credentials: Arc<C>, operators: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self {
            credentials,
            operators,
            tokens,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let profile = self
            .credentials
            .verify(&input.username, &input.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Captures reference operators by id, so the row must exist before
        // the first upload.
        let created = self
            .operators
            .ensure_exists(&Operator::from_profile(&profile))
            .await?;
        if created {
            tracing::info!(operator_id = %profile.id, "Operator record created");
        }

        let access_token = self.tokens.issue(&profile)?;

        tracing::info!(
            operator_id = %profile.id,
            role = %profile.role,
            "Operator signed in"
        );

        Ok(SignInOutput {
            access_token,
            operator: profile,
        })
    }
}
