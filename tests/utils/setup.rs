#![allow(dead_code)] // Test utilities may not all be used in every test

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use flagstats::{
    build_router,
    config::{CookieConfig, CredentialsConfig, UserCredential},
    plays::{PlayEntryService, PlayLogRepository},
    session::{
        credentials::hash_password, repository::InMemorySessionRepository,
        service::SessionService, token::TokenConfig,
    },
    AppState, CsvPlayLogRepository, InMemoryPlayLogRepository, PlayEvent, StatsService,
    TeamProfile, YardageScope,
};

pub const USERNAME: &str = "coach";
pub const PASSWORD: &str = "touchdown";
pub const ROSTER: [&str; 8] = ["Ana", "Ben", "Cal", "Dee", "Eli", "Fay", "Gus", "Hal"];

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub state: AppState,
    pub token: Option<String>,
    pub log_path: Option<PathBuf>,
    _log_dir: Option<TempDir>,
}

pub struct TestSetupBuilder {
    plays: Vec<PlayEvent>,
    csv_log: bool,
    scope: YardageScope,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            plays: Vec::new(),
            csv_log: false,
            scope: YardageScope::default(),
        }
    }

    pub fn with_plays(mut self, plays: Vec<PlayEvent>) -> Self {
        self.plays = plays;
        self
    }

    /// Backs the log with a CSV file in a fresh temp directory.
    pub fn with_csv_log(mut self) -> Self {
        self.csv_log = true;
        self
    }

    pub fn with_yardage_scope(mut self, scope: YardageScope) -> Self {
        self.scope = scope;
        self
    }

    pub async fn build(self) -> TestSetup {
        let mut log_dir = None;
        let mut log_path = None;
        let play_log: Arc<dyn PlayLogRepository> = if self.csv_log {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("team_stats.csv");
            if !self.plays.is_empty() {
                let bytes = CsvPlayLogRepository::render(&self.plays).unwrap();
                std::fs::write(&path, bytes).unwrap();
            }
            let repo = CsvPlayLogRepository::new(path.clone());
            log_dir = Some(dir);
            log_path = Some(path);
            Arc::new(repo)
        } else {
            Arc::new(InMemoryPlayLogRepository::with_plays(self.plays))
        };

        let team = Arc::new(TeamProfile {
            team_name: "LA Clams".to_string(),
            season: "Fall 2023".to_string(),
            roster: ROSTER.iter().map(|s| s.to_string()).collect(),
            max_weeks: 10,
        });

        let mut credentials = CredentialsConfig::default();
        credentials.usernames.insert(
            USERNAME.to_string(),
            UserCredential {
                name: "Coach".to_string(),
                password: hash_password(PASSWORD).unwrap(),
            },
        );
        let cookie = CookieConfig {
            key: "integration-secret".to_string(),
            expiry_days: 1,
        };

        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemorySessionRepository::new()),
            TokenConfig::from_cookie(&cookie),
            credentials,
        ));
        let play_service = Arc::new(PlayEntryService::new(play_log.clone(), team.clone()));
        let stats_service = Arc::new(
            StatsService::builder(play_log)
                .with_yardage_scope(self.scope)
                .with_roster(team.roster.clone())
                .with_max_weeks(team.max_weeks)
                .build(),
        );

        let state = AppState::new(session_service, play_service, stats_service, team);

        TestSetup {
            app: build_router(state.clone()),
            state,
            token: None,
            log_path,
            _log_dir: log_dir,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSetup {
    /// Signs in as the test coach and keeps the bearer token for later calls.
    pub async fn login(&mut self) {
        let (status, body) = self
            .request(
                Method::POST,
                "/login",
                Some(serde_json::json!({ "username": USERNAME, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        self.token = Some(body["token"].as_str().unwrap().to_string());
    }

    pub async fn logged_in(mut self) -> Self {
        self.login().await;
        self
    }

    /// A second signed-in client on the same app and log.
    pub async fn another_login(&self) -> TestSetup {
        let mut other = TestSetup {
            app: self.app.clone(),
            state: self.state.clone(),
            token: None,
            log_path: self.log_path.clone(),
            _log_dir: None,
        };
        other.login().await;
        other
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Sends a request and parses the body as JSON (`Null` when empty).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let (status, bytes) = self.send(Method::GET, uri, None).await;
        (status, String::from_utf8(bytes).unwrap())
    }

    pub async fn select_week(&self, week: u32, opponent: &str) -> (StatusCode, Value) {
        self.request(
            Method::PUT,
            "/admin/entry",
            Some(serde_json::json!({ "week": week, "opponent": opponent })),
        )
        .await
    }

    pub async fn submit(&self, form: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/admin/plays", Some(form)).await
    }

    pub async fn delete_last(&self) -> (StatusCode, Value) {
        self.request(Method::DELETE, "/admin/plays/last", None).await
    }
}
