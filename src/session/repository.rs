use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::SessionModel;
use crate::shared::AppError;

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError>;
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError>;
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError>;
    /// Removes expired sessions and returns their ids.
    async fn cleanup_expired_sessions(&self) -> Result<Vec<String>, AppError>;
}

/// In-memory session store. Sessions are lost on restart, which signs every
/// admin out.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionModel>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<SessionModel>) -> Self {
        let sessions = sessions
            .into_iter()
            .map(|session| (session.id.clone(), session))
            .collect();

        Self {
            sessions: RwLock::new(sessions),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(session_id = %session.id, username = %session.username, "Creating session in memory");

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            warn!(session_id = %session.id, "Session already exists in memory");
            return Err(AppError::Storage("Session already exists".to_string()));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError> {
        let session = self.sessions.read().await.get(session_id).cloned();
        debug!(session_id = %session_id, found = session.is_some(), "Fetched session from memory");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        if self.sessions.write().await.remove(session_id).is_none() {
            warn!(session_id = %session_id, "Session not found for deletion in memory");
            return Err(AppError::NotFound("Session not found".to_string()));
        }

        debug!(session_id = %session_id, "Session deleted from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cleanup_expired_sessions(&self) -> Result<Vec<String>, AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        let expired: Vec<String> = sessions
            .values()
            .filter(|session| session.expires_at <= now)
            .map(|session| session.id.clone())
            .collect();
        for session_id in &expired {
            sessions.remove(session_id);
        }

        debug!(expired_sessions_removed = expired.len(), "Expired sessions cleaned up");
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_delete() {
        let repo = InMemorySessionRepository::new();
        let session = SessionModel::new("coach".to_string(), 1);

        repo.create_session(&session).await.unwrap();
        assert!(repo.create_session(&session).await.is_err());

        let fetched = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "coach");

        repo.delete_session(&session.id).await.unwrap();
        assert!(repo.get_session(&session.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_session(&session.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let stale = SessionModel::new("stale".to_string(), -1);
        let repo = InMemorySessionRepository::with_sessions(vec![
            SessionModel::new("fresh".to_string(), 1),
            stale.clone(),
        ]);

        let stale_id = stale.id.clone();
        assert_eq!(repo.cleanup_expired_sessions().await.unwrap(), vec![stale_id]);
        assert_eq!(repo.session_count().await, 1);
    }
}
