//! Access Tokens
//!
//! Stateless HS256 tokens. The subject is the operator id; role and display
//! name travel as private claims so protected routes never touch the store.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::operator::OperatorProfile;
use crate::domain::value_object::operator_role::OperatorRole;
use crate::error::{AuthError, AuthResult};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Operator id
    pub sub: String,
    pub role: OperatorRole,
    pub name: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_operator(profile: &OperatorProfile, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: profile.id.to_string(),
            role: profile.role,
            name: profile.name.clone(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }

    pub fn into_profile(self) -> OperatorProfile {
        OperatorProfile::new(self.sub, self.name, self.role)
    }
}

/// Issues and validates access tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(&config.token_secret),
            decoding: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a token for the operator, valid from now
    pub fn issue(&self, profile: &OperatorProfile) -> AuthResult<String> {
        self.issue_at(profile, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(&self, profile: &OperatorProfile, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let claims = TokenClaims::for_operator(profile, issued_at, self.ttl_secs);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))
    }

    /// Verify signature and expiry.
    ///
    /// Every failure maps to `InvalidToken`; callers cannot tell an expired
    /// token from a forged one.
    pub fn validate(&self, token: &str) -> AuthResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }
}
