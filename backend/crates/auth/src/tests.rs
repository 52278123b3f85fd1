//! Unit tests for Auth crate

#[cfg(test)]
mod token_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::domain::entity::operator::OperatorProfile;
    use crate::domain::value_object::operator_role::OperatorRole;
    use crate::error::AuthError;
    use chrono::{Duration, Utc};

    fn bodega() -> OperatorProfile {
        OperatorProfile::new("bodega", "Bodega", OperatorRole::Bodega)
    }

    #[test]
    fn test_issue_then_validate_returns_same_identity() {
        let tokens = TokenService::new(&AuthConfig::with_secret("s3cret"));

        let token = tokens.issue(&bodega()).unwrap();
        let claims = tokens.validate(&token).unwrap();

        assert_eq!(claims.sub, "bodega");
        assert_eq!(claims.role, OperatorRole::Bodega);
        assert_eq!(claims.name, "Bodega");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
        assert_eq!(claims.into_profile(), bodega());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new(&AuthConfig::with_secret("s3cret"));
        let issued_at = Utc::now() - Duration::days(8);

        let token = tokens.issue_at(&bodega(), issued_at).unwrap();

        assert!(matches!(
            tokens.validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_just_inside_ttl_is_accepted() {
        let tokens = TokenService::new(&AuthConfig::with_secret("s3cret"));
        let issued_at = Utc::now() - Duration::days(7) + Duration::minutes(5);

        let token = tokens.issue_at(&bodega(), issued_at).unwrap();

        assert!(tokens.validate(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new(&AuthConfig::with_secret("one"));
        let verifier = TokenService::new(&AuthConfig::with_secret("two"));

        let token = issuer.issue(&bodega()).unwrap();

        assert!(matches!(
            verifier.validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_and_garbage_tokens_are_rejected() {
        let tokens = TokenService::new(&AuthConfig::with_secret("s3cret"));
        let token = tokens.issue(&bodega()).unwrap();

        // Admin payload under the bodega signature
        let admin = OperatorProfile::new("admin", "Administrador", OperatorRole::Admin);
        let admin_token = tokens.issue(&admin).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert!(tokens.validate(&tampered).is_err());
        assert!(tokens.validate("not-a-token").is_err());
        assert!(tokens.validate("").is_err());
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let config = AuthConfig::with_secret("super-secret-value");
        let debug = format!("{config:?}");

        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("redacted"));
        assert!(!config.uses_dev_secret());
        assert!(AuthConfig::default().uses_dev_secret());
    }
}

#[cfg(test)]
mod authorize_tests {
    use crate::application::authorize;
    use crate::domain::entity::operator::OperatorProfile;
    use crate::domain::value_object::operator_role::OperatorRole;
    use crate::error::AuthError;

    #[test]
    fn test_role_in_allowed_set() {
        let admin = OperatorProfile::new("admin", "Administrador", OperatorRole::Admin);
        assert!(authorize(&admin, &[OperatorRole::Admin, OperatorRole::Bodega]).is_ok());
    }

    #[test]
    fn test_role_outside_allowed_set() {
        let bodega = OperatorProfile::new("bodega", "Bodega", OperatorRole::Bodega);
        let result = authorize(&bodega, &[OperatorRole::Admin, OperatorRole::CallCenter]);
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }
}

#[cfg(test)]
mod credentials_tests {
    use crate::domain::repository::CredentialProvider;
    use crate::domain::value_object::operator_role::OperatorRole;
    use crate::infra::StaticCredentialProvider;

    #[tokio::test]
    async fn test_default_accounts() {
        let provider = StaticCredentialProvider::warehouse_defaults();

        let admin = provider.verify("admin", "admin").await.unwrap().unwrap();
        assert_eq!(admin.id.as_str(), "admin");
        assert_eq!(admin.name, "Administrador");
        assert_eq!(admin.role, OperatorRole::Admin);

        let bodega = provider.verify("bodega", "bodega2025").await.unwrap().unwrap();
        assert_eq!(bodega.role, OperatorRole::Bodega);

        let cc = provider
            .verify("callcenter", "callcenter123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cc.name, "Call Center");
        assert_eq!(cc.role, OperatorRole::CallCenter);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let provider = StaticCredentialProvider::warehouse_defaults();

        assert!(provider.verify("admin", "Admin").await.unwrap().is_none());
        assert!(provider.verify("admin", "").await.unwrap().is_none());
        assert!(provider.verify("nobody", "admin").await.unwrap().is_none());
        assert!(provider.verify("ADMIN", "admin").await.unwrap().is_none());
    }
}

#[cfg(test)]
mod sign_in_tests {
    use std::sync::Arc;

    use crate::application::{AuthConfig, SignInInput, SignInUseCase, TokenService};
    use crate::domain::value_object::operator_role::OperatorRole;
    use crate::error::AuthError;
    use crate::infra::{SqliteOperatorRepository, StaticCredentialProvider};

    async fn use_case() -> (
        SignInUseCase<StaticCredentialProvider, SqliteOperatorRepository>,
        Arc<SqliteOperatorRepository>,
        Arc<TokenService>,
    ) {
        let pool = platform::database::memory_pool().await.unwrap();
        let operators = Arc::new(SqliteOperatorRepository::new(pool));
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secret("test")));
        let use_case = SignInUseCase::new(
            Arc::new(StaticCredentialProvider::warehouse_defaults()),
            operators.clone(),
            tokens.clone(),
        );
        (use_case, operators, tokens)
    }

    fn input(username: &str, password: &str) -> SignInInput {
        SignInInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_creates_operator_once() {
        let (use_case, operators, tokens) = use_case().await;

        let first = use_case.execute(input("bodega", "bodega2025")).await.unwrap();
        let second = use_case.execute(input("bodega", "bodega2025")).await.unwrap();

        let claims = tokens.validate(&first.access_token).unwrap();
        assert_eq!(claims.sub, "bodega");
        assert_eq!(second.operator.role, OperatorRole::Bodega);

        let (name, role, active): (String, String, bool) =
            sqlx::query_as("SELECT name, role, active FROM operators WHERE id = ?")
                .bind("bodega")
                .fetch_one(operators.pool())
                .await
                .unwrap();
        assert_eq!(name, "Bodega");
        assert_eq!(role, OperatorRole::Bodega.code());
        assert!(active);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM operators")
            .fetch_one(operators.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_bad_credentials_do_not_create_operator() {
        let (use_case, operators, _) = use_case().await;

        let result = use_case.execute(input("admin", "wrong")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM operators")
            .fetch_one(operators.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Router, middleware};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::application::{AuthConfig, TokenService};
    use crate::domain::value_object::operator_role::OperatorRole;
    use crate::infra::{SqliteOperatorRepository, StaticCredentialProvider};
    use crate::presentation::middleware::{BearerAuthState, CurrentOperator, require_bearer};
    use crate::presentation::router::auth_router;
    use crate::error::AuthResult;

    async fn login_app() -> (Router, Arc<TokenService>) {
        let pool = platform::database::memory_pool().await.unwrap();
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secret("test")));
        let router = auth_router(
            StaticCredentialProvider::warehouse_defaults(),
            SqliteOperatorRepository::new(pool),
            tokens.clone(),
        );
        (router, tokens)
    }

    fn login_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let (app, tokens) = login_app().await;

        let response = app
            .oneshot(login_request("username=callcenter&password=callcenter123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["token_type"], "bearer");
        assert_eq!(body["operator_id"], "callcenter");
        assert_eq!(body["operator_name"], "Call Center");
        assert_eq!(body["role"], "callcenter");

        let token = body["access_token"].as_str().unwrap();
        let claims = tokens.validate(token).unwrap();
        assert_eq!(claims.role, OperatorRole::CallCenter);
    }

    #[tokio::test]
    async fn test_login_bad_password() {
        let (app, _) = login_app().await;

        let response = app
            .oneshot(login_request("username=admin&password=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = json_body(response).await;
        assert_eq!(body["detail"], "Invalid credentials");
    }

    async fn whoami(operator: CurrentOperator) -> AuthResult<String> {
        let profile = operator.require_any(&[OperatorRole::Admin])?;
        Ok(profile.id.to_string())
    }

    fn protected_app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route("/whoami", get(whoami).options(|| async { StatusCode::NO_CONTENT }))
            .route_layer(middleware::from_fn_with_state(
                BearerAuthState::new(tokens),
                require_bearer,
            ))
    }

    fn get_with(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_is_401_with_challenge() {
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secret("test")));
        let response = protected_app(tokens).oneshot(get_with(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body = json_body(response).await;
        assert_eq!(body["detail"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_valid_token_and_role_checks() {
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secret("test")));
        let admin = crate::domain::OperatorProfile::new("admin", "Administrador", OperatorRole::Admin);
        let bodega = crate::domain::OperatorProfile::new("bodega", "Bodega", OperatorRole::Bodega);

        let admin_token = tokens.issue(&admin).unwrap();
        let response = protected_app(tokens.clone())
            .oneshot(get_with(Some(&admin_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bodega_token = tokens.issue(&bodega).unwrap();
        let response = protected_app(tokens.clone())
            .oneshot(get_with(Some(&bodega_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_preflight_skips_auth() {
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secret("test")));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();

        let response = protected_app(tokens).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let app_error = AuthError::Internal("secret detail".into()).into_app_error();
        assert!(!app_error.message().contains("secret detail"));
    }
}
