mod utils;

use axum::http::{Method, StatusCode};
use serde_json::json;
use utils::*;

#[tokio::test]
async fn test_admin_routes_require_login() {
    let setup = TestSetupBuilder::new().build().await;

    let (status, _) = setup.get("/admin/entry").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = setup.submit(run_form("Cal", 5)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let setup = TestSetupBuilder::new().build().await;

    let (status, body) = setup
        .request(
            Method::POST,
            "/login",
            Some(json!({ "username": USERNAME, "password": "fumble" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Username/password is incorrect");
}

#[tokio::test]
async fn test_record_game_and_read_box_score() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;

    let (status, entry) = setup.get("/admin/entry").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["week"], 1);
    assert_eq!(entry["play_count"], 0);

    let (status, entry) = setup.select_week(2, "Sharks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["week"], 2);
    assert_eq!(entry["opponent"], "Sharks");

    let forms = [
        run_form("Cal", 5),
        pass_form("Ben", 10, true),
        rushing_td_form("Cal", 5),
        conversion_form("2-point", true),
    ];
    let expected_points = [0, 0, 6, 2];

    for (i, form) in forms.into_iter().enumerate() {
        let (status, body) = setup.submit(form).await;
        assert_eq!(status, StatusCode::CREATED, "play {} rejected: {body}", i + 1);
        assert_eq!(body["play"]["play_sequence"], i as u64 + 1);
        assert_eq!(body["play"]["points"], expected_points[i]);
        assert_eq!(body["play"]["opponent"], "Sharks");
        assert_eq!(body["entry"]["play_count"], i as u64 + 1);
    }

    let (status, score) = setup.get("/stats/weeks/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["title"], "Week 2 vs Sharks");
    assert_eq!(stat(&score, "Outcome"), json!("W"));
    assert_eq!(stat(&score, "LA Clams Score"), json!(8));
    assert_eq!(stat(&score, "Opponent Score"), json!(0));
    assert_eq!(stat(&score, "Total Rushing Yards"), json!(10));
    assert_eq!(stat(&score, "Total Receiving Yards"), json!(10));
    assert_eq!(stat(&score, "Conversion Rate"), json!(100.0));

    let (status, plays) = setup.get("/admin/plays").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plays.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_delete_last_play_rolls_back_score() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(2, "Sharks").await;
    setup.submit(run_form("Cal", 5)).await;
    setup.submit(rushing_td_form("Cal", 5)).await;
    setup.submit(conversion_form("2-point", true)).await;

    let (status, body) = setup.delete_last().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"]["play_sequence"], 3);
    assert_eq!(body["entry"]["play_count"], 2);

    let (_, score) = setup.get("/stats/weeks/2").await;
    assert_eq!(stat(&score, "LA Clams Score"), json!(6));

    // The next play reuses the freed sequence number.
    let (_, body) = setup.submit(conversion_form("1-point", true)).await;
    assert_eq!(body["play"]["play_sequence"], 3);
    assert_eq!(body["play"]["points"], 1);
}

#[tokio::test]
async fn test_delete_with_nothing_recorded() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(1, "Sharks").await;

    let (status, body) = setup.delete_last().await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No plays have been inputted yet for deletion.");
}

#[tokio::test]
async fn test_form_with_six_players_is_rejected() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(1, "Sharks").await;

    let form = PlayFormBuilder::offense("Run").by("Cal").yards(3).players(6).build();
    let (status, body) = setup.submit(form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please select exactly 7 players (got 6)");

    let (_, entry) = setup.get("/admin/entry").await;
    assert_eq!(entry["play_count"], 0);
}

#[tokio::test]
async fn test_play_requires_opponent() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;

    let (status, body) = setup.submit(run_form("Cal", 3)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Enter the opponent before recording plays");
}

#[tokio::test]
async fn test_pass_requires_outcome() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(1, "Sharks").await;

    let form = PlayFormBuilder::offense("Pass").by("Ben").yards(8).build();
    let (status, body) = setup.submit(form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Pass requires a pass outcome");
}

#[tokio::test]
async fn test_off_roster_player_is_rejected() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(1, "Sharks").await;

    let form = PlayFormBuilder::offense("Run").by("Zed").yards(3).build();
    let (status, body) = setup.submit(form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Zed is not on the roster");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;

    let (status, _) = setup.request(Method::POST, "/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = setup.get("/admin/entry").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_new_login_resumes_from_log() {
    let mut setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(3, "Otters").await;
    setup.submit(run_form("Cal", 4)).await;
    setup.submit(flag_pull_form("Dee", -2)).await;

    setup.request(Method::POST, "/logout", None).await;
    setup.login().await;

    let (_, entry) = setup.get("/admin/entry").await;
    assert_eq!(entry["week"], 1);
    assert_eq!(entry["play_count"], 0);

    let (status, entry) = setup
        .request(Method::PUT, "/admin/entry", Some(json!({ "week": 3 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["opponent"], "Otters");
    assert_eq!(entry["play_count"], 2);

    let (_, body) = setup.submit(run_form("Cal", 1)).await;
    assert_eq!(body["play"]["play_sequence"], 3);
}

#[tokio::test]
async fn test_opponent_is_fixed_once_week_has_plays() {
    let setup = TestSetupBuilder::new().build().await.logged_in().await;
    setup.select_week(3, "Otters").await;
    setup.submit(run_form("Cal", 4)).await;

    let (status, body) = setup.select_week(3, "Bears").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Week 3 is already recorded against Otters");

    let (_, entry) = setup.get("/admin/entry").await;
    assert_eq!(entry["opponent"], "Otters");

    let (status, body) = setup.submit(run_form("Cal", 2)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["play"]["opponent"], "Otters");

    let (_, plays) = setup.get("/admin/plays").await;
    assert!(plays
        .as_array()
        .unwrap()
        .iter()
        .all(|play| play["opponent"] == "Otters"));
}

#[tokio::test]
async fn test_two_logins_on_one_week() {
    let first = TestSetupBuilder::new().build().await.logged_in().await;
    let second = first.another_login().await;
    first.select_week(1, "Sharks").await;
    second.select_week(1, "Sharks").await;

    first.submit(run_form("Cal", 4)).await;
    let (_, body) = second.submit(run_form("Cal", 7)).await;
    assert_eq!(body["play"]["play_sequence"], 2);
    let (_, body) = first.submit(run_form("Cal", 9)).await;
    assert_eq!(body["play"]["play_sequence"], 3);

    let (status, body) = second.delete_last().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"]["play_sequence"], 3);
    assert_eq!(body["deleted"]["yards"], 9);
    assert_eq!(body["entry"]["play_count"], 2);

    let (_, plays) = first.get("/admin/plays").await;
    let rows: Vec<(u64, i64)> = plays
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["play_sequence"].as_u64().unwrap(), p["yards"].as_i64().unwrap()))
        .collect();
    assert_eq!(rows, vec![(1, 4), (2, 7)]);
}
