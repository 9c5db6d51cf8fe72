//! Clan handlers
//!
//! Clan registry and per-clan settings.

use axum::{extract::State, Json};
use clan_service::{
    ClanDetailsResponse, ClanResponse, ClanService, CreateClanRequest, SettingsResponse,
    SettingsService, UpdateSettingsRequest,
};

use crate::extractors::{AuthUser, ClanPath, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List clans
///
/// GET /clans
pub async fn list_clans(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ClanResponse>>> {
    let service = ClanService::new(state.service_context());
    Ok(Json(service.list_clans().await?))
}

/// Register a clan
///
/// POST /clans
pub async fn create_clan(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateClanRequest>,
) -> ApiResult<Created<Json<ClanResponse>>> {
    let service = ClanService::new(state.service_context());
    let clan = service.create_clan(&auth.account_id, request).await?;
    Ok(Created(Json(clan)))
}

/// Get clan with settings
///
/// GET /clans/{clan_tag}
pub async fn get_clan(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<ClanDetailsResponse>> {
    let clan_tag = path.clan_tag()?;

    let service = ClanService::new(state.service_context());
    Ok(Json(service.get_clan(&clan_tag).await?))
}

/// Get clan settings
///
/// GET /clans/{clan_tag}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<SettingsResponse>> {
    let clan_tag = path.clan_tag()?;

    let service = SettingsService::new(state.service_context());
    Ok(Json(service.get_settings(&clan_tag).await?))
}

/// Update clan settings
///
/// PATCH /clans/{clan_tag}/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    let clan_tag = path.clan_tag()?;

    let service = SettingsService::new(state.service_context());
    let settings = service
        .update_settings(&clan_tag, &auth.account_id, request)
        .await?;
    Ok(Json(settings))
}
