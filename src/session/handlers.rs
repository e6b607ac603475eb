use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, instrument};

use super::types::{LoginRequest, SessionClaims, SessionResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for signing in an admin
///
/// POST /login
/// Returns a JWT bearer token for the /admin and /stats routes
#[instrument(name = "login", skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .session_service
        .login(&request.username, &request.password)
        .await?;

    info!(name = %session.name, "Admin signed in");
    Ok(Json(session))
}

/// HTTP handler for signing out
///
/// POST /logout
/// Revokes the session and forgets its entry state
#[instrument(name = "logout", skip(state, claims), fields(username = %claims.username))]
pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<StatusCode, AppError> {
    state.session_service.logout(&claims.session_id).await?;
    state.entry_sessions.remove(&claims.session_id).await;

    info!("Admin signed out");
    Ok(StatusCode::NO_CONTENT)
}
