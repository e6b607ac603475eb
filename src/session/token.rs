use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::SessionClaims;
use crate::config::CookieConfig;
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_days: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_days: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_days,
        }
    }

    /// Seeds the secret and lifetime from the cookie block of `team.yaml`;
    /// `JWT_SECRET` and `SESSION_EXPIRATION_DAYS` take precedence.
    pub fn from_cookie(cookie: &CookieConfig) -> Self {
        Self::from_cookie_with_lookup(cookie, |key| std::env::var(key).ok())
    }

    pub fn from_cookie_with_lookup(
        cookie: &CookieConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let expiration_days = lookup("SESSION_EXPIRATION_DAYS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(cookie.expiry_days);

        Self {
            secret: lookup("JWT_SECRET").unwrap_or_else(|| cookie.key.clone()),
            expiration_days,
        }
    }

    /// Creates a new JWT token with the given session data
    #[instrument(skip(self, session_id, username))]
    pub fn create_token(&self, session_id: String, username: String) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::days(self.expiration_days)).timestamp() as usize;

        debug!(
            expiration_days = self.expiration_days,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = SessionClaims {
            session_id,
            username,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Validates a JWT token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                username = %data.claims.username,
                session_id = %data.claims.session_id,
                exp = data.claims.exp,
                "JWT token decoded"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::JwtError(e.to_string())
        })
    }
}
