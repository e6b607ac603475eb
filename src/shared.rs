use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::TeamProfile;
use crate::plays::{EntrySessions, PlayEntryService, PlayLogError, ValidationError};
use crate::session::service::SessionService;
use crate::stats::{StatsError, StatsService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub play_service: Arc<PlayEntryService>,
    pub stats_service: Arc<StatsService>,
    pub entry_sessions: Arc<EntrySessions>,
    pub team: Arc<TeamProfile>,
}

impl AppState {
    pub fn new(
        session_service: Arc<SessionService>,
        play_service: Arc<PlayEntryService>,
        stats_service: Arc<StatsService>,
        team: Arc<TeamProfile>,
    ) -> Self {
        Self {
            session_service,
            play_service,
            stats_service,
            entry_sessions: Arc::new(EntrySessions::new()),
            team,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<PlayLogError> for AppError {
    fn from(err: PlayLogError) -> Self {
        match err {
            PlayLogError::Missing(_) => AppError::NotFound(err.to_string()),
            PlayLogError::OpponentConflict { .. } => AppError::BadRequest(err.to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Log(log) => log.into(),
            no_data => AppError::NotFound(no_data.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::config::{CookieConfig, CredentialsConfig, UserCredential};
    use crate::plays::{InMemoryPlayLogRepository, PlayEvent, PlayLogRepository};
    use crate::session::{
        credentials::hash_password,
        repository::{InMemorySessionRepository, SessionRepository},
        token::TokenConfig,
    };

    pub const TEST_USER: &str = "coach";
    pub const TEST_PASSWORD: &str = "hunter2";

    pub fn test_team() -> TeamProfile {
        TeamProfile {
            team_name: "LA Clams".to_string(),
            season: "Fall 2023".to_string(),
            roster: ["Ana", "Ben", "Cal", "Dee", "Eli", "Fay", "Gus", "Hal"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_weeks: 10,
        }
    }

    pub fn test_credentials() -> CredentialsConfig {
        let mut credentials = CredentialsConfig::default();
        credentials.usernames.insert(
            TEST_USER.to_string(),
            UserCredential {
                name: "Coach".to_string(),
                password: hash_password(TEST_PASSWORD).unwrap(),
            },
        );
        credentials
    }

    pub fn test_cookie() -> CookieConfig {
        CookieConfig {
            key: "test-secret".to_string(),
            expiry_days: 1,
        }
    }

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        plays: Vec<PlayEvent>,
        session_repository: Option<Arc<dyn SessionRepository>>,
        team: TeamProfile,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                plays: Vec::new(),
                session_repository: None,
                team: test_team(),
            }
        }

        pub fn with_plays(mut self, plays: Vec<PlayEvent>) -> Self {
            self.plays = plays;
            self
        }

        pub fn with_session_repository(mut self, repo: Arc<dyn SessionRepository>) -> Self {
            self.session_repository = Some(repo);
            self
        }

        pub fn build(self) -> AppState {
            let repository: Arc<dyn PlayLogRepository> =
                Arc::new(InMemoryPlayLogRepository::with_plays(self.plays));
            let sessions: Arc<dyn SessionRepository> = match self.session_repository {
                Some(repo) => repo,
                None => Arc::new(InMemorySessionRepository::new()),
            };
            let team = Arc::new(self.team);

            let session_service = Arc::new(SessionService::new(
                sessions,
                TokenConfig::from_cookie(&test_cookie()),
                test_credentials(),
            ));
            let play_service = Arc::new(PlayEntryService::new(repository.clone(), team.clone()));
            let stats_service = Arc::new(
                StatsService::builder(repository)
                    .with_roster(team.roster.clone())
                    .build(),
            );

            AppState::new(session_service, play_service, stats_service, team)
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
