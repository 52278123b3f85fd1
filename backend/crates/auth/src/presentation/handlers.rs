//! HTTP Handlers

use axum::extract::State;
use axum::{Form, Json};
use std::sync::Arc;

use crate::application::{SignInInput, SignInUseCase, TokenService};
use crate::domain::repository::{CredentialProvider, OperatorRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LoginForm, LoginResponse};

/// Shared state for auth handlers
pub struct AuthAppState<C, R>
where
    C: CredentialProvider + Send + Sync + 'static,
    R: OperatorRepository + Send + Sync + 'static,
{
    pub credentials: Arc<C>,
    pub operators: Arc<R>,
    pub tokens: Arc<TokenService>,
}

// Manual impl: the derive would require `C: Clone, R: Clone`.
impl<C, R> Clone for AuthAppState<C, R>
where
    C: CredentialProvider + Send + Sync + 'static,
    R: OperatorRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            operators: self.operators.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// POST /token
pub async fn issue_token<C, R>(
    State(state): State<AuthAppState<C, R>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Json<LoginResponse>>
where
    C: CredentialProvider + Send + Sync + 'static,
    R: OperatorRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.credentials.clone(),
        state.operators.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            username: form.username,
            password: form.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        token_type: LoginResponse::TOKEN_TYPE,
        operator_id: output.operator.id.to_string(),
        operator_name: output.operator.name,
        role: output.operator.role,
    }))
}
