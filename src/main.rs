use std::sync::Arc;

use flagstats::{
    build_router,
    plays::{CsvPlayLogRepository, PlayEntryService, PlayLogRepository},
    session::{
        self, repository::InMemorySessionRepository, service::SessionService, token::TokenConfig,
        CleanupConfig,
    },
    AppConfig, AppState, StatsService, TeamConfig,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let team_config = TeamConfig::load(&config.team_config_path)?;
    info!(
        team = %team_config.profile.team_name,
        season = %team_config.profile.season,
        play_log = %config.play_log_path.display(),
        yardage_scope = %config.yardage_scope,
        "Starting flag football stats server"
    );

    let team = Arc::new(team_config.profile);
    let play_log: Arc<dyn PlayLogRepository> =
        Arc::new(CsvPlayLogRepository::new(config.play_log_path.clone()));

    let session_service = Arc::new(SessionService::new(
        Arc::new(InMemorySessionRepository::new()),
        TokenConfig::from_cookie(&team_config.cookie),
        team_config.credentials,
    ));
    let play_service = Arc::new(PlayEntryService::new(play_log.clone(), team.clone()));
    let stats_service = Arc::new(
        StatsService::builder(play_log)
            .with_yardage_scope(config.yardage_scope)
            .with_roster(team.roster.clone())
            .with_max_weeks(team.max_weeks)
            .build(),
    );

    let app_state = AppState::new(session_service, play_service, stats_service, team);
    tokio::spawn(session::start_cleanup_task(
        app_state.clone(),
        CleanupConfig::default(),
    ));
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
