use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{plays, session, shared::AppState, stats};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full application router. Everything except `/health` and
/// `/login` requires a bearer token.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/logout", post(session::logout))
        .route("/admin/entry", get(plays::get_entry).put(plays::select_entry))
        .route("/admin/plays", get(plays::list_plays).post(plays::submit_play))
        .route("/admin/plays/last", delete(plays::delete_last_play))
        .route("/stats/season", get(stats::get_season_summary))
        .route("/stats/weeks", get(stats::list_weeks))
        .route("/stats/weeks/:week", get(stats::get_box_score))
        .route("/stats/weeks/:week/players", get(stats::get_week_game_lines))
        .route("/stats/players", get(stats::list_players))
        .route("/stats/players/:name", get(stats::get_player_season))
        .route("/stats/players/:name/weeks/:week", get(stats::get_player_game))
        .route("/stats/export/player-games.csv", get(stats::export_game_lines))
        .route_layer(middleware::from_fn_with_state(state.clone(), session::jwt_auth));

    Router::new()
        .route("/health", get(health))
        .route("/login", post(session::login))
        .merge(protected)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
