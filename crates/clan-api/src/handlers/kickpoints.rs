//! Kickpoint handlers
//!
//! Clan-scoped creation and overview, per-player views, and edits by id.

use axum::{extract::State, Json};
use clan_service::{
    ClanKickpointsResponse, CreateKickpointRequest, KickpointResponse, KickpointService,
    KickpointSummaryResponse, UpdateKickpointRequest,
};

use crate::extractors::{AuthUser, ClanPath, IdPath, PlayerPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Active kickpoint sums of a clan's members
///
/// GET /clans/{clan_tag}/kickpoints
pub async fn clan_kickpoints(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<Vec<ClanKickpointsResponse>>> {
    let clan_tag = path.clan_tag()?;

    let service = KickpointService::new(state.service_context());
    Ok(Json(service.active_for_clan(&clan_tag).await?))
}

/// Record a kickpoint
///
/// POST /clans/{clan_tag}/kickpoints
pub async fn create_kickpoint(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
    ValidatedJson(request): ValidatedJson<CreateKickpointRequest>,
) -> ApiResult<Created<Json<KickpointResponse>>> {
    let clan_tag = path.clan_tag()?;

    let service = KickpointService::new(state.service_context());
    let kickpoint = service
        .create_kickpoint(&clan_tag, &auth.account_id, request)
        .await?;
    Ok(Created(Json(kickpoint)))
}

/// Active kickpoints of a player
///
/// GET /players/{player_tag}/kickpoints
pub async fn player_kickpoints(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
) -> ApiResult<Json<Vec<KickpointResponse>>> {
    let player_tag = path.player_tag()?;

    let service = KickpointService::new(state.service_context());
    Ok(Json(service.active_for_player(&player_tag).await?))
}

/// Active and lifetime kickpoint sums of a player
///
/// GET /players/{player_tag}/kickpoints/summary
pub async fn player_summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
) -> ApiResult<Json<KickpointSummaryResponse>> {
    let player_tag = path.player_tag()?;

    let service = KickpointService::new(state.service_context());
    Ok(Json(service.summary_for_player(&player_tag).await?))
}

/// Future-dated kickpoints of a player
///
/// GET /players/{player_tag}/kickpoints/future
pub async fn player_future_kickpoints(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
) -> ApiResult<Json<Vec<KickpointResponse>>> {
    let player_tag = path.player_tag()?;

    let service = KickpointService::new(state.service_context());
    Ok(Json(service.future_for_player(&player_tag).await?))
}

/// GET /kickpoints/{id}
pub async fn get_kickpoint(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<KickpointResponse>> {
    let service = KickpointService::new(state.service_context());
    Ok(Json(service.get_kickpoint(id).await?))
}

/// PATCH /kickpoints/{id}
pub async fn update_kickpoint(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateKickpointRequest>,
) -> ApiResult<Json<KickpointResponse>> {
    let service = KickpointService::new(state.service_context());
    let kickpoint = service
        .update_kickpoint(id, &auth.account_id, request)
        .await?;
    Ok(Json(kickpoint))
}

/// DELETE /kickpoints/{id}
pub async fn delete_kickpoint(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<i64>,
) -> ApiResult<NoContent> {
    let service = KickpointService::new(state.service_context());
    service.delete_kickpoint(id, &auth.account_id).await?;
    Ok(NoContent)
}
