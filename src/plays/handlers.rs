use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, instrument};

use super::{
    entry::EntrySession,
    models::PlayEvent,
    types::{DeletePlayResponse, PlayForm, SelectWeekRequest, SubmitPlayResponse},
};
use crate::{
    session::SessionClaims,
    shared::{AppError, AppState},
};

/// Loads the caller's entry state, opening week 1 on first use.
async fn current_entry(state: &AppState, claims: &SessionClaims) -> Result<EntrySession, AppError> {
    match state.entry_sessions.get(&claims.session_id).await {
        Some(entry) => Ok(entry),
        None => state.play_service.open_entry(1).await,
    }
}

/// HTTP handler for reading the caller's entry state
///
/// GET /admin/entry
#[instrument(name = "get_entry", skip(state, claims), fields(username = %claims.username))]
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<EntrySession>, AppError> {
    let entry = current_entry(&state, &claims).await?;
    state.entry_sessions.put(&claims.session_id, entry.clone()).await;
    Ok(Json(entry))
}

/// HTTP handler for choosing the week and opponent being recorded
///
/// PUT /admin/entry
#[instrument(name = "select_entry", skip(state, claims), fields(username = %claims.username))]
pub async fn select_entry(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(request): Json<SelectWeekRequest>,
) -> Result<Json<EntrySession>, AppError> {
    let mut entry = current_entry(&state, &claims).await?;
    state.play_service.select_week(&mut entry, request).await?;
    state.entry_sessions.put(&claims.session_id, entry.clone()).await;

    info!(week = entry.week, opponent = %entry.opponent, "Entry week selected");
    Ok(Json(entry))
}

/// HTTP handler for listing the full play log
///
/// GET /admin/plays
#[instrument(name = "list_plays", skip(state))]
pub async fn list_plays(State(state): State<AppState>) -> Result<Json<Vec<PlayEvent>>, AppError> {
    let plays = state.play_service.list_plays().await?;
    info!(play_count = plays.len(), "Plays listed");
    Ok(Json(plays))
}

/// HTTP handler for recording one play
///
/// POST /admin/plays
#[instrument(name = "submit_play", skip(state, claims, form), fields(username = %claims.username))]
pub async fn submit_play(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(form): Json<PlayForm>,
) -> Result<(StatusCode, Json<SubmitPlayResponse>), AppError> {
    let mut entry = current_entry(&state, &claims).await?;
    let play = state.play_service.submit_play(&mut entry, form).await?;
    state.entry_sessions.put(&claims.session_id, entry.clone()).await;

    Ok((StatusCode::CREATED, Json(SubmitPlayResponse { play, entry })))
}

/// HTTP handler for removing the most recent play of the current week
///
/// DELETE /admin/plays/last
#[instrument(name = "delete_last_play", skip(state, claims), fields(username = %claims.username))]
pub async fn delete_last_play(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<DeletePlayResponse>, AppError> {
    let mut entry = current_entry(&state, &claims).await?;
    let deleted = state.play_service.delete_last_play(&mut entry).await?;
    state.entry_sessions.put(&claims.session_id, entry.clone()).await;

    Ok(Json(DeletePlayResponse { deleted, entry }))
}
