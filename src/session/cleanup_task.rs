use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use crate::shared::{AppError, AppState};

/// Configuration for the session cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often expired sessions are swept
    pub cleanup_interval: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(30 * 60), // 30 minutes
        }
    }
}

/// Starts the background task that periodically drops expired sessions and
/// the entry state attached to them
#[instrument(skip(state))]
pub async fn start_cleanup_task(state: AppState, config: CleanupConfig) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        "Starting session cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        match sweep_expired_sessions(&state).await {
            Ok(removed) => info!(removed, "Session cleanup completed"),
            Err(e) => error!(error = %e, "Session cleanup task failed"),
        }
    }
}

/// Removes expired sessions and their entry sessions; returns how many went.
pub async fn sweep_expired_sessions(state: &AppState) -> Result<usize, AppError> {
    let expired = state.session_service.cleanup_expired_sessions().await?;
    for session_id in &expired {
        state.entry_sessions.remove(session_id).await;
    }
    Ok(expired.len())
}
