use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use super::{lines::PlayerGameLine, service::WeekListing, types::StatsResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for season-long team averages
///
/// GET /stats/season
#[instrument(name = "get_season_summary", skip(state))]
pub async fn get_season_summary(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let summary = state.stats_service.season_summary().await?;
    info!(games = summary.games(), "Season summary computed");

    Ok(Json(StatsResponse::new(
        format!("{} Season Averages", state.team.season),
        summary.to_table(&state.team.team_name),
    )))
}

/// GET /stats/weeks
#[instrument(name = "list_weeks", skip(state))]
pub async fn list_weeks(State(state): State<AppState>) -> Result<Json<WeekListing>, AppError> {
    Ok(Json(state.stats_service.weeks().await?))
}

/// HTTP handler for a single game's box score
///
/// GET /stats/weeks/:week
#[instrument(name = "get_box_score", skip(state))]
pub async fn get_box_score(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> Result<Json<StatsResponse>, AppError> {
    let score = state.stats_service.box_score(week).await?;

    Ok(Json(StatsResponse::new(
        format!("Week {} vs {}", score.week, score.opponent),
        score.to_table(&state.team.team_name),
    )))
}

/// GET /stats/weeks/:week/players
#[instrument(name = "get_week_game_lines", skip(state))]
pub async fn get_week_game_lines(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> Result<Json<Vec<PlayerGameLine>>, AppError> {
    Ok(Json(state.stats_service.game_lines(week).await?))
}

/// GET /stats/players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.stats_service.players().await?))
}

/// HTTP handler for one player's season averages
///
/// GET /stats/players/:name
#[instrument(name = "get_player_season", skip(state))]
pub async fn get_player_season(
    State(state): State<AppState>,
    Path(player): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.player_season(&player).await?;

    Ok(Json(StatsResponse::new(
        format!("{player} Season Stats"),
        stats.to_table(),
    )))
}

/// HTTP handler for one player's line in one game
///
/// GET /stats/players/:name/weeks/:week
#[instrument(name = "get_player_game", skip(state))]
pub async fn get_player_game(
    State(state): State<AppState>,
    Path((player, week)): Path<(String, u32)>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.player_game(&player, week).await?;

    Ok(Json(StatsResponse::new(
        format!("{player} Week {week} Stats"),
        stats.to_table(),
    )))
}

/// HTTP handler for downloading every derived game line
///
/// GET /stats/export/player-games.csv
#[instrument(name = "export_game_lines", skip(state))]
pub async fn export_game_lines(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.stats_service.export_game_lines().await?;
    info!(bytes = body.len(), "Game lines exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"player_games.csv\"",
            ),
        ],
        body,
    ))
}
