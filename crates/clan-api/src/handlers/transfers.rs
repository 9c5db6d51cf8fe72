//! Transfer handler

use axum::{extract::State, Json};
use clan_service::{MemberResponse, MemberService, MutationResponse, TransferMemberRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Move a player between clans
///
/// POST /transfers
pub async fn transfer_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<TransferMemberRequest>,
) -> ApiResult<Json<MutationResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let outcome = service.transfer_member(&auth.account_id, request).await?;
    Ok(Json(outcome.into()))
}
