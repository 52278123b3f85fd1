//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::TokenService;
use crate::domain::repository::{CredentialProvider, OperatorRepository};
use crate::infra::{SqliteOperatorRepository, StaticCredentialProvider};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the static accounts and SQLite operators
pub fn auth_router(
    credentials: StaticCredentialProvider,
    operators: SqliteOperatorRepository,
    tokens: Arc<TokenService>,
) -> Router {
    auth_router_generic(credentials, operators, tokens)
}

/// Create a generic Auth router for any provider/repository implementation
pub fn auth_router_generic<C, R>(credentials: C, operators: R, tokens: Arc<TokenService>) -> Router
where
    C: CredentialProvider + Send + Sync + 'static,
    R: OperatorRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        credentials: Arc::new(credentials),
        operators: Arc::new(operators),
        tokens,
    };

    Router::new()
        .route("/token", post(handlers::issue_token::<C, R>))
        .with_state(state)
}
