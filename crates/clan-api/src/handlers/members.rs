//! Member handlers
//!
//! Endpoints for clan membership and the kickpoint lock.

use axum::{extract::State, Json};
use clan_service::{
    AddMemberRequest, KickpointLockResponse, MemberResponse, MemberService, MemberStatusResponse,
    MutationResponse, UpdateMemberRequest,
};

use crate::extractors::{AuthUser, ClanMemberPath, ClanPath, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List clan members
///
/// GET /clans/{clan_tag}/members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let clan_tag = path.clan_tag()?;

    let service = MemberService::new(state.service_context());
    Ok(Json(service.list_members(&clan_tag).await?))
}

/// Add a member
///
/// POST /clans/{clan_tag}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
    ValidatedJson(request): ValidatedJson<AddMemberRequest>,
) -> ApiResult<Created<Json<MutationResponse<MemberResponse>>>> {
    let clan_tag = path.clan_tag()?;

    let service = MemberService::new(state.service_context());
    let outcome = service
        .add_member(&clan_tag, &auth.account_id, request)
        .await?;
    Ok(Created(Json(outcome.into())))
}

/// Get a member
///
/// GET /clans/{clan_tag}/members/{player_tag}
pub async fn get_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanMemberPath>,
) -> ApiResult<Json<MemberResponse>> {
    let clan_tag = path.clan_tag()?;
    let player_tag = path.player_tag()?;

    let service = MemberService::new(state.service_context());
    Ok(Json(service.get_member(&clan_tag, &player_tag).await?))
}

/// Change a member's role
///
/// PATCH /clans/{clan_tag}/members/{player_tag}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanMemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let clan_tag = path.clan_tag()?;
    let player_tag = path.player_tag()?;

    let service = MemberService::new(state.service_context());
    let member = service
        .update_member(&clan_tag, &player_tag, &auth.account_id, request)
        .await?;
    Ok(Json(member))
}

/// Remove a member
///
/// DELETE /clans/{clan_tag}/members/{player_tag}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanMemberPath>,
) -> ApiResult<Json<MutationResponse<()>>> {
    let clan_tag = path.clan_tag()?;
    let player_tag = path.player_tag()?;

    let service = MemberService::new(state.service_context());
    let outcome = service
        .remove_member(&clan_tag, &player_tag, &auth.account_id)
        .await?;
    Ok(Json(outcome.into()))
}

/// Lock kickpoints for a member
///
/// PUT /clans/{clan_tag}/members/{player_tag}/kickpoint-lock
pub async fn lock_kickpoints(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanMemberPath>,
) -> ApiResult<Json<KickpointLockResponse>> {
    set_lock(state, auth, path, true).await
}

/// Unlock kickpoints for a member
///
/// DELETE /clans/{clan_tag}/members/{player_tag}/kickpoint-lock
pub async fn unlock_kickpoints(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanMemberPath>,
) -> ApiResult<Json<KickpointLockResponse>> {
    set_lock(state, auth, path, false).await
}

async fn set_lock(
    state: AppState,
    auth: AuthUser,
    path: ClanMemberPath,
    locked: bool,
) -> ApiResult<Json<KickpointLockResponse>> {
    let clan_tag = path.clan_tag()?;
    let player_tag = path.player_tag()?;

    let service = MemberService::new(state.service_context());
    let response = service
        .set_kickpoint_lock(&clan_tag, &player_tag, &auth.account_id, locked)
        .await?;
    Ok(Json(response))
}

/// Stored roster compared with the in-game roster
///
/// GET /clans/{clan_tag}/members/status
pub async fn member_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<MemberStatusResponse>> {
    let clan_tag = path.clan_tag()?;

    let service = MemberService::new(state.service_context());
    Ok(Json(service.member_status(&clan_tag).await?))
}
