use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    credentials::CredentialStore,
    models::SessionModel,
    repository::SessionRepository,
    token::TokenConfig,
    types::{SessionClaims, SessionResponse},
};
use crate::{config::CredentialsConfig, shared::AppError};

/// Service for handling session business logic
pub struct SessionService {
    token_config: TokenConfig,
    repository: Arc<dyn SessionRepository>,
    credentials: CredentialStore,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        token_config: TokenConfig,
        credentials: CredentialsConfig,
    ) -> Self {
        Self {
            token_config,
            repository,
            credentials: CredentialStore::new(credentials),
        }
    }

    /// Checks the credentials, stores a session and returns its JWT
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionResponse, AppError> {
        let user = match self.credentials.verify(username, password) {
            Ok(user) => user,
            Err(e) => {
                warn!(username = %username, "Login rejected");
                return Err(e);
            }
        };

        let session = SessionModel::new(username.to_string(), self.token_config.expiration_days);
        self.repository.create_session(&session).await?;
        let token = self
            .token_config
            .create_token(session.id.clone(), username.to_string())?;

        info!(username = %username, session_id = %session.id, "Login succeeded");

        Ok(SessionResponse {
            token,
            username: username.to_string(),
            name: user.name.clone(),
            expires_in_days: self.token_config.expiration_days,
        })
    }

    /// Validates a session token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub async fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = self.token_config.validate_token(token)?;

        match self.repository.get_session(&claims.session_id).await? {
            Some(session_model) => {
                if session_model.is_expired() {
                    warn!(
                        session_id = %claims.session_id,
                        "Session found but has expired"
                    );
                    return Err(AppError::Unauthorized("Session has expired".to_string()));
                }
                Ok(claims)
            }
            None => {
                warn!(
                    session_id = %claims.session_id,
                    "Session not found - may have been revoked"
                );
                Err(AppError::Unauthorized(
                    "Session not found or has been revoked".to_string(),
                ))
            }
        }
    }

    /// Revokes a session by removing it from the store
    #[instrument(skip(self))]
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        self.repository.delete_session(session_id).await?;
        info!(session_id = %session_id, "Session revoked");
        Ok(())
    }

    /// Drops expired sessions from the store and returns their ids
    #[instrument(skip(self))]
    pub async fn cleanup_expired_sessions(&self) -> Result<Vec<String>, AppError> {
        let removed = self.repository.cleanup_expired_sessions().await?;
        info!(removed_sessions = removed.len(), "Expired sessions cleaned up");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::repository::InMemorySessionRepository;
    use crate::shared::test_utils::{test_credentials, TEST_PASSWORD, TEST_USER};

    fn service() -> SessionService {
        SessionService::new(
            Arc::new(InMemorySessionRepository::new()),
            TokenConfig::new("test-secret", 1),
            test_credentials(),
        )
    }

    #[tokio::test]
    async fn test_login_then_validate() {
        let service = service();
        let session = service.login(TEST_USER, TEST_PASSWORD).await.unwrap();

        assert!(session.token.contains('.'));
        assert_eq!(session.name, "Coach");

        let claims = service.validate_session(&session.token).await.unwrap();
        assert_eq!(claims.username, TEST_USER);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let result = service().login(TEST_USER, "nope").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_validate_session_not_found() {
        let service = service();
        let token = TokenConfig::new("test-secret", 1)
            .create_token("non-existent-session".to_string(), TEST_USER.to_string())
            .unwrap();

        let result = service.validate_session(&token).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_logout_revokes_session() {
        let service = service();
        let session = service.login(TEST_USER, TEST_PASSWORD).await.unwrap();
        let claims = service.validate_session(&session.token).await.unwrap();

        service.logout(&claims.session_id).await.unwrap();

        let result = service.validate_session(&session.token).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let service = SessionService::new(
            repo.clone(),
            TokenConfig::new("test-secret", 1),
            test_credentials(),
        );

        let stale = SessionModel::new(TEST_USER.to_string(), -1);
        repo.create_session(&stale).await.unwrap();
        let token = TokenConfig::new("test-secret", 1)
            .create_token(stale.id.clone(), TEST_USER.to_string())
            .unwrap();

        let result = service.validate_session(&token).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert_eq!(service.cleanup_expired_sessions().await.unwrap(), vec![stale.id]);
    }
}
