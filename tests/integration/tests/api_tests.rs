//! API Integration Tests
//!
//! Exercise the full router in-process over the in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use axum::http::{Method, StatusCode};
use chrono::Duration;
use clan_core::entities::WarParticipant;
use integration_tests::*;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::seeded();

    let response = app.request(Method::GET, "/health", None, None).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let app = TestApp::seeded();

    let response = app.request(Method::GET, "/health/ready", None, None).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["checks"]["database"], "healthy");

    app.world.store.set_healthy(false);
    let response = app.request(Method::GET, "/health/ready", None, None).await;
    let body = response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

// ============================================================================
// Authentication and Path Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = TestApp::seeded();

    let response = app
        .request(Method::GET, "/api/v1/clans", None, None)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_invalid_tag_in_path() {
    let app = TestApp::seeded();

    let response = app.get("/api/v1/clans/XYZ/members", LEADER).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TAG");
}

#[tokio::test]
async fn test_tags_are_accepted_without_hash() {
    let app = TestApp::seeded();

    let response = app.get("/api/v1/clans/2pp", OUTSIDER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["tag"], MAIN_CLAN);
    assert_eq!(body["name"], "Lost F2P");
    assert_eq!(body["settings"]["kickpoint_ceiling"], 6);
}

// ============================================================================
// Registry Tests
// ============================================================================

#[tokio::test]
async fn test_list_and_create_clans() {
    let app = TestApp::seeded();

    let body = json!({ "tag": "#JJJ", "name": "Lost F2P 3", "index": 3 });
    let response = app.post("/api/v1/clans", LEADER, body.clone()).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "MISSING_ROLE");

    app.post("/api/v1/clans", ADMIN, body.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.post("/api/v1/clans", ADMIN, body).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CLAN_ALREADY_EXISTS");

    let response = app.get("/api/v1/clans", MEMBER).await;
    let clans = response.assert_status(StatusCode::OK).as_array().unwrap();
    assert_eq!(clans.len(), 3);
    assert_eq!(clans[2]["tag"], "#JJJ");
}

#[tokio::test]
async fn test_players() {
    let app = TestApp::seeded();

    let response = app
        .put(
            "/api/v1/players/GGG",
            ADMIN,
            Some(json!({ "name": "Newcomer", "discord_id": null })),
        )
        .await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["tag"], "#GGG");

    let response = app.get("/api/v1/players/GGG/membership", ADMIN).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NO_ACTIVE_MEMBERSHIP");

    let response = app.get("/api/v1/players/RJC/membership", MEMBER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["clan_tag"], MAIN_CLAN);
    assert_eq!(body["role"], "member");

    let response = app.get("/api/v1/players/YYYY", MEMBER).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UNKNOWN_PLAYER");
}

#[tokio::test]
async fn test_update_settings() {
    let app = TestApp::seeded();

    let response = app
        .patch(
            "/api/v1/clans/2PP/settings",
            LEADER,
            json!({ "kickpoint_expiry_days": 30 }),
        )
        .await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["kickpoint_expiry_days"], 30);
    assert_eq!(body["updated_by"], LEADER);

    let response = app
        .patch("/api/v1/clans/2PP/settings", LEADER, json!({ "kickpoint_ceiling": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert!(response.body["error"]["details"].is_object());

    let response = app
        .patch("/api/v1/clans/2PP/settings", CO_LEADER, json!({}))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

// ============================================================================
// Membership Tests
// ============================================================================

#[tokio::test]
async fn test_add_member() {
    let app = TestApp::seeded();

    let response = app
        .post(
            "/api/v1/clans/2PP/members",
            CO_LEADER,
            json!({ "player_tag": FREE_AGENT_TAG, "role": "member" }),
        )
        .await;
    let body = response.assert_status(StatusCode::CREATED);
    assert_eq!(body["data"]["player_tag"], FREE_AGENT_TAG);
    assert_eq!(body["data"]["clan_tag"], MAIN_CLAN);
    assert_eq!(body["data"]["name"], "Wanderer");
    assert_eq!(body["data"]["added_by"], CO_LEADER);
    assert!(body.get("warnings").is_none());

    let response = app
        .post(
            "/api/v1/clans/9CYG/members",
            SECOND_LEADER,
            json!({ "player_tag": FREE_AGENT_TAG, "role": "member" }),
        )
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "ALREADY_MEMBER");
}

#[tokio::test]
async fn test_add_member_needs_role() {
    let app = TestApp::seeded();

    let response = app
        .post(
            "/api/v1/clans/2PP/members",
            ELDER,
            json!({ "player_tag": FREE_AGENT_TAG, "role": "member" }),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "MISSING_ROLE");
    let details = &response.body["error"]["details"];
    assert_eq!(details["clan_tag"], MAIN_CLAN);
    assert_eq!(details["required_role"], "co_leader");

    let response = app
        .post(
            "/api/v1/clans/2PP/members",
            LEADER,
            json!({ "player_tag": FREE_AGENT_TAG, "role": "overlord" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_BODY");
}

#[tokio::test]
async fn test_add_member_reports_role_sync_warnings() {
    let app = TestApp::seeded();
    app.world.roles.set_failing(true);

    let response = app
        .post(
            "/api/v1/clans/2PP/members",
            LEADER,
            json!({ "player_tag": FREE_AGENT_TAG, "role": "elder" }),
        )
        .await;
    let body = response.assert_status(StatusCode::CREATED);
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0]["action"], "grant_clan_role");
    assert_eq!(warnings[1]["action"], "revoke_ex_member_role");
}

#[tokio::test]
async fn test_member_lifecycle() {
    let app = TestApp::seeded();

    let response = app
        .patch(
            "/api/v1/clans/2PP/members/RJC",
            CO_LEADER,
            json!({ "role": "elder" }),
        )
        .await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["role"], "elder");

    let response = app
        .patch(
            "/api/v1/clans/2PP/members/RJC",
            CO_LEADER,
            json!({ "role": "elder" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "ROLE_UNCHANGED");

    let response = app.delete("/api/v1/clans/2PP/members/RJC", CO_LEADER).await;
    response.assert_status(StatusCode::OK);

    let response = app.get("/api/v1/clans/2PP/members/RJC", CO_LEADER).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UNKNOWN_MEMBER");

    let response = app.get("/api/v1/clans/2PP/members", CO_LEADER).await;
    let members = response.assert_status(StatusCode::OK).as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["role"], "leader");
}

#[tokio::test]
async fn test_member_status() {
    let app = TestApp::seeded();
    app.world.oracle.set_clan(snapshot(
        MAIN_CLAN,
        vec![
            game_member(LEADER_TAG, "Chief", clan_core::ClanRole::Leader),
            game_member("#VVV", "Stranger", clan_core::ClanRole::Member),
        ],
    ));

    let response = app.get("/api/v1/clans/2PP/members/status", LEADER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["missing_in_game"].as_array().unwrap().len(), 3);
    assert_eq!(body["not_registered"][0]["tag"], "#VVV");

    app.world.oracle.set_down(true);
    let response = app.get("/api/v1/clans/2PP/members/status", LEADER).await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "UPSTREAM_UNAVAILABLE");
}

// ============================================================================
// Transfer Tests
// ============================================================================

#[tokio::test]
async fn test_transfer() {
    let app = TestApp::seeded();
    let body = json!({
        "player_tag": ELDER_TAG,
        "from_clan_tag": MAIN_CLAN,
        "to_clan_tag": SECOND_CLAN,
        "role": "coLeader",
    });

    let response = app.post("/api/v1/transfers", LEADER, body.clone()).await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = app.post("/api/v1/transfers", ADMIN, body.clone()).await;
    let data = &response.assert_status(StatusCode::OK)["data"];
    assert_eq!(data["clan_tag"], SECOND_CLAN);
    assert_eq!(data["role"], "co_leader");
    assert_eq!(data["added_by"], ADMIN);

    // The player is no longer in the source clan
    let response = app.post("/api/v1/transfers", ADMIN, body).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UNKNOWN_MEMBER");
}

#[tokio::test]
async fn test_transfer_to_unknown_clan() {
    let app = TestApp::seeded();

    let response = app
        .post(
            "/api/v1/transfers",
            ADMIN,
            json!({
                "player_tag": ELDER_TAG,
                "from_clan_tag": MAIN_CLAN,
                "to_clan_tag": UNKNOWN_CLAN,
                "role": "member",
            }),
        )
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UNKNOWN_CLAN");

    let response = app.get("/api/v1/players/LV9/membership", ELDER).await;
    assert_eq!(
        response.assert_status(StatusCode::OK)["clan_tag"],
        MAIN_CLAN
    );
}

// ============================================================================
// Kickpoint Tests
// ============================================================================

#[tokio::test]
async fn test_kickpoint_crud() {
    let app = TestApp::seeded();

    let response = app
        .post(
            "/api/v1/clans/2PP/kickpoints",
            CO_LEADER,
            json!({ "player_tag": MEMBER_TAG, "amount": 2, "description": "missed attack" }),
        )
        .await;
    let body = response.assert_status(StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["expires_at"], "2024-04-15T12:00:00Z");
    assert_eq!(body["player_name"], "Rookie");

    let path = format!("/api/v1/kickpoints/{id}");
    let response = app.patch(&path, CO_LEADER, json!({ "amount": 3 })).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["amount"], 3);
    assert_eq!(body["updated_by"], CO_LEADER);

    let response = app.get("/api/v1/players/RJC/kickpoints/summary", MEMBER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["active_sum"], 3);
    assert_eq!(body["lifetime_sum"], 3);

    let response = app.delete(&path, ELDER).await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = app.delete(&path, LEADER).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get(&path, LEADER).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UNKNOWN_KICKPOINT");

    let response = app.get("/api/v1/kickpoints/abc", LEADER).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_kickpoint_expiry_over_http() {
    let app = TestApp::seeded();

    app.post(
        "/api/v1/clans/2PP/kickpoints",
        LEADER,
        json!({ "player_tag": MEMBER_TAG, "amount": 1, "description": "late" }),
    )
    .await
    .assert_status(StatusCode::CREATED);

    app.world.clock.set(t0() + Duration::days(44));
    let response = app.get("/api/v1/players/RJC/kickpoints", MEMBER).await;
    assert_eq!(
        response.assert_status(StatusCode::OK).as_array().unwrap().len(),
        1
    );

    app.world.clock.set(t0() + Duration::days(46));
    let response = app.get("/api/v1/players/RJC/kickpoints", MEMBER).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NO_KICKPOINTS");

    let response = app.get("/api/v1/players/RJC/kickpoints/summary", MEMBER).await;
    assert_eq!(response.assert_status(StatusCode::OK)["active_sum"], 0);
}

#[tokio::test]
async fn test_clan_kickpoints() {
    let app = TestApp::seeded();

    let response = app.get("/api/v1/clans/2PP/kickpoints", MEMBER).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NO_KICKPOINTS");

    for amount in [3, 3] {
        app.post(
            "/api/v1/clans/2PP/kickpoints",
            LEADER,
            json!({ "player_tag": ELDER_TAG, "amount": amount, "description": "no attacks" }),
        )
        .await
        .assert_status(StatusCode::CREATED);
    }

    let response = app.get("/api/v1/clans/2PP/kickpoints", MEMBER).await;
    let rows = response.assert_status(StatusCode::OK).as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["player_tag"], ELDER_TAG);
    assert_eq!(rows[0]["amount"], 6);
    assert_eq!(rows[0]["at_or_over_ceiling"], true);
}

#[tokio::test]
async fn test_kickpoint_lock_over_http() {
    let app = TestApp::seeded();

    let response = app
        .put("/api/v1/clans/2PP/members/RJC/kickpoint-lock", CO_LEADER, None)
        .await;
    assert_eq!(
        response.assert_status(StatusCode::OK)["kickpoint_lock"],
        true
    );

    let response = app
        .post(
            "/api/v1/clans/2PP/kickpoints",
            LEADER,
            json!({ "player_tag": MEMBER_TAG, "amount": 1, "description": "late" }),
        )
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "KICKPOINTS_LOCKED");

    let response = app
        .delete("/api/v1/clans/2PP/members/RJC/kickpoint-lock", CO_LEADER)
        .await;
    assert_eq!(
        response.assert_status(StatusCode::OK)["kickpoint_lock"],
        false
    );
}

#[tokio::test]
async fn test_kickpoint_body_validation() {
    let app = TestApp::seeded();

    let response = app
        .post(
            "/api/v1/clans/2PP/kickpoints",
            LEADER,
            json!({ "player_tag": MEMBER_TAG, "amount": 1, "description": "" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .post(
            "/api/v1/clans/2PP/kickpoints",
            LEADER,
            json!({ "player_tag": MEMBER_TAG, "amount": "two", "description": "late" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_BODY");

    let response = app
        .post(
            "/api/v1/clans/2PP/kickpoints",
            LEADER,
            json!({
                "player_tag": MEMBER_TAG,
                "amount": 1,
                "description": "late",
                "date": "+262142-12-20T00:00:00Z"
            }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert_eq!(app.world.store.kickpoint_count(), 0);
}

// ============================================================================
// Donator Tests
// ============================================================================

#[tokio::test]
async fn test_donators() {
    let app = TestApp::seeded();

    app.world
        .oracle
        .set_war_roster(tag(MAIN_CLAN), war_roster(15, &[]));
    let response = app.get("/api/v1/clans/2PP/donators", MEMBER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["status"], "no_candidates");
    assert!(body["message"].is_string());

    let roster: Vec<WarParticipant> = war_roster(15, &[1, 4, 7]);
    app.world.oracle.set_war_roster(tag(MAIN_CLAN), roster);
    let response = app.get("/api/v1/clans/2PP/donators", MEMBER).await;
    let body = response.assert_status(StatusCode::OK);
    assert_eq!(body["status"], "assigned");

    let donators = body["donators"].as_array().unwrap();
    assert_eq!(donators.len(), 2);
    assert_eq!(donators[0]["range"]["start"], 1);
    assert_eq!(donators[0]["range"]["end"], 8);
    assert_eq!(donators[1]["range"]["start"], 9);
    assert_eq!(donators[1]["range"]["end"], 15);
    assert_ne!(donators[0]["tag"], donators[1]["tag"]);
}
