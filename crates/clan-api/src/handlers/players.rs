//! Player handlers

use axum::{extract::State, Json};
use clan_service::{
    MemberService, MembershipResponse, PlayerResponse, PlayerService, UpsertPlayerRequest,
};

use crate::extractors::{AuthUser, IdPath, PlayerPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /players/{player_tag}
pub async fn get_player(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
) -> ApiResult<Json<PlayerResponse>> {
    let player_tag = path.player_tag()?;

    let service = PlayerService::new(state.service_context());
    Ok(Json(service.get_player(&player_tag).await?))
}

/// Create or update a player
///
/// PUT /players/{player_tag}
pub async fn upsert_player(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
    ValidatedJson(request): ValidatedJson<UpsertPlayerRequest>,
) -> ApiResult<Json<PlayerResponse>> {
    let player_tag = path.player_tag()?;

    let service = PlayerService::new(state.service_context());
    let player = service
        .upsert_player(&player_tag, &auth.account_id, request)
        .await?;
    Ok(Json(player))
}

/// The player's current clan membership
///
/// GET /players/{player_tag}/membership
pub async fn get_membership(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<PlayerPath>,
) -> ApiResult<Json<MembershipResponse>> {
    let player_tag = path.player_tag()?;

    let service = MemberService::new(state.service_context());
    Ok(Json(service.current_membership(&player_tag).await?))
}
