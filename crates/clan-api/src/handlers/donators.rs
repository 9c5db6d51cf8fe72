//! Donator handler

use axum::{extract::State, Json};
use clan_service::{DonatorService, DonatorsResponse};

use crate::extractors::{AuthUser, ClanPath, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Draw war donators for the clan's current war
///
/// GET /clans/{clan_tag}/donators
pub async fn select_donators(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(path): IdPath<ClanPath>,
) -> ApiResult<Json<DonatorsResponse>> {
    let clan_tag = path.clan_tag()?;

    let service = DonatorService::new(state.service_context());
    Ok(Json(service.select(&clan_tag).await?))
}
