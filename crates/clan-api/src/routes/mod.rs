//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{clans, donators, health, kickpoints, members, players, transfers};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(clan_routes())
        .merge(player_routes())
        .merge(kickpoint_routes())
        .route("/transfers", post(transfers::transfer_member))
}

/// Clan, membership and clan-scoped kickpoint routes
fn clan_routes() -> Router<AppState> {
    Router::new()
        .route("/clans", get(clans::list_clans).post(clans::create_clan))
        .route("/clans/:clan_tag", get(clans::get_clan))
        .route(
            "/clans/:clan_tag/settings",
            get(clans::get_settings).patch(clans::update_settings),
        )
        // Members
        .route(
            "/clans/:clan_tag/members",
            get(members::list_members).post(members::add_member),
        )
        .route("/clans/:clan_tag/members/status", get(members::member_status))
        .route(
            "/clans/:clan_tag/members/:player_tag",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::remove_member),
        )
        .route(
            "/clans/:clan_tag/members/:player_tag/kickpoint-lock",
            put(members::lock_kickpoints).delete(members::unlock_kickpoints),
        )
        // Kickpoints
        .route(
            "/clans/:clan_tag/kickpoints",
            get(kickpoints::clan_kickpoints).post(kickpoints::create_kickpoint),
        )
        // War
        .route("/clans/:clan_tag/donators", get(donators::select_donators))
}

fn player_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/players/:player_tag",
            get(players::get_player).put(players::upsert_player),
        )
        .route("/players/:player_tag/membership", get(players::get_membership))
        .route("/players/:player_tag/kickpoints", get(kickpoints::player_kickpoints))
        .route(
            "/players/:player_tag/kickpoints/summary",
            get(kickpoints::player_summary),
        )
        .route(
            "/players/:player_tag/kickpoints/future",
            get(kickpoints::player_future_kickpoints),
        )
}

fn kickpoint_routes() -> Router<AppState> {
    Router::new().route(
        "/kickpoints/:id",
        get(kickpoints::get_kickpoint)
            .patch(kickpoints::update_kickpoint)
            .delete(kickpoints::delete_kickpoint),
    )
}
