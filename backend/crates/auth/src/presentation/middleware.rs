//! Auth Middleware
//!
//! Bearer token gate for protected routes and the extractor that hands the
//! verified operator to handlers.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::Method;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::application::{TokenService, authorize};
use crate::domain::entity::operator::OperatorProfile;
use crate::domain::value_object::operator_role::OperatorRole;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState {
    pub tokens: Arc<TokenService>,
}

impl BearerAuthState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid bearer token.
///
/// CORS preflight (`OPTIONS`) passes through unauthenticated. On success the
/// verified [`CurrentOperator`] is stored in request extensions.
pub async fn require_bearer(
    State(state): State<BearerAuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer_token(req.headers()).ok_or(AuthError::InvalidToken)?;
    let claims = state.tokens.validate(&token)?;

    req.extensions_mut().insert(CurrentOperator {
        profile: claims.into_profile(),
    });

    Ok(next.run(req).await)
}

/// Operator authenticated by [`require_bearer`]
#[derive(Debug, Clone)]
pub struct CurrentOperator {
    pub profile: OperatorProfile,
}

impl CurrentOperator {
    /// Reject with 403 unless the operator holds one of `roles`
    pub fn require_any(&self, roles: &[OperatorRole]) -> AuthResult<&OperatorProfile> {
        authorize(&self.profile, roles)?;
        Ok(&self.profile)
    }
}

impl<S> FromRequestParts<S> for CurrentOperator
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentOperator>()
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
