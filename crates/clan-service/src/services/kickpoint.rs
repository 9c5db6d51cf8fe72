//! Kickpoint service
//!
//! The kickpoint ledger. Every record carries its own expiry, computed from
//! the clan policy at the time the record is written. Activity is always
//! evaluated against the context clock.

use clan_core::entities::{Kickpoint, KickpointChanges, KickpointDetails, NewKickpoint};
use clan_core::{AuthRole, DomainError, Tag};
use tracing::{info, instrument};

use crate::dto::{
    ClanKickpointsResponse, CreateKickpointRequest, KickpointResponse, KickpointSummaryResponse,
    UpdateKickpointRequest,
};

use super::authorization::AuthorizationService;
use super::clan::find_clan;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::member_not_found;

pub struct KickpointService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> KickpointService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a kickpoint for a member of `clan_tag`
    #[instrument(skip(self, request))]
    pub async fn create_kickpoint(
        &self,
        clan_tag: &Tag,
        actor_id: &str,
        request: CreateKickpointRequest,
    ) -> ServiceResult<KickpointResponse> {
        let now = self.ctx.now();
        let kickpoint = NewKickpoint {
            player_tag: Tag::parse(&request.player_tag)?,
            clan_tag: clan_tag.clone(),
            amount: request.amount,
            description: request.description,
            date: request.date.unwrap_or(now),
            created_by: actor_id.to_string(),
        };
        kickpoint.validate()?;

        AuthorizationService::new(self.ctx)
            .require(actor_id, clan_tag, AuthRole::CoLeader)
            .await?;

        let player_tag = &kickpoint.player_tag;
        self.ctx
            .member_repo()
            .find(player_tag, clan_tag)
            .await?
            .ok_or_else(|| member_not_found(player_tag, clan_tag))?;

        let state = self
            .ctx
            .member_state_repo()
            .find_or_default(player_tag, clan_tag)
            .await?;
        if state.kickpoint_lock {
            return Err(DomainError::KickpointsLocked {
                player_tag: player_tag.clone(),
                clan_tag: clan_tag.clone(),
            }
            .into());
        }

        let settings = self.ctx.settings_repo().find_or_default(clan_tag).await?;
        let expires_at = settings.expires_at(kickpoint.date)?;

        let created = self
            .ctx
            .kickpoint_repo()
            .create(&kickpoint, expires_at, now)
            .await?;

        info!(
            kickpoint_id = created.id,
            player_tag = %created.player_tag,
            clan_tag = %created.clan_tag,
            amount = created.amount,
            expires_at = %created.expires_at,
            "Kickpoint created"
        );

        self.get_kickpoint(created.id).await
    }

    /// One kickpoint with player and clan names
    #[instrument(skip(self))]
    pub async fn get_kickpoint(&self, id: i64) -> ServiceResult<KickpointResponse> {
        Ok(self.find_details(id).await?.into())
    }

    /// Change amount, description or date. The expiry is recomputed from the
    /// (new) date under the clan's current policy.
    #[instrument(skip(self, request))]
    pub async fn update_kickpoint(
        &self,
        id: i64,
        actor_id: &str,
        request: UpdateKickpointRequest,
    ) -> ServiceResult<KickpointResponse> {
        let changes = KickpointChanges {
            amount: request.amount,
            description: request.description,
            date: request.date,
        };
        if changes.is_empty() {
            return Err(DomainError::InvalidInput("no changes given".to_string()).into());
        }
        changes.validate()?;

        let existing = self.find_details(id).await?.kickpoint;

        AuthorizationService::new(self.ctx)
            .require(actor_id, &existing.clan_tag, AuthRole::CoLeader)
            .await?;

        let settings = self
            .ctx
            .settings_repo()
            .find_or_default(&existing.clan_tag)
            .await?;
        let updated = changes.apply_to(&existing);
        let expires_at = settings.expires_at(updated.date)?;

        self.ctx
            .kickpoint_repo()
            .update(id, &changes, expires_at, actor_id, self.ctx.now())
            .await?;

        info!(kickpoint_id = id, expires_at = %expires_at, "Kickpoint updated");

        self.get_kickpoint(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_kickpoint(&self, id: i64, actor_id: &str) -> ServiceResult<()> {
        let existing = self.find_details(id).await?.kickpoint;

        AuthorizationService::new(self.ctx)
            .require(actor_id, &existing.clan_tag, AuthRole::CoLeader)
            .await?;

        self.ctx.kickpoint_repo().delete(id).await?;

        info!(kickpoint_id = id, player_tag = %existing.player_tag, "Kickpoint deleted");
        Ok(())
    }

    /// Active kickpoints of a player, oldest first. Empty is `NoKickpoints`.
    #[instrument(skip(self))]
    pub async fn active_for_player(&self, player_tag: &Tag) -> ServiceResult<Vec<KickpointResponse>> {
        let kickpoints = self
            .ctx
            .kickpoint_repo()
            .list_active_by_player(player_tag, self.ctx.now())
            .await?;
        non_empty(player_tag, kickpoints)
    }

    /// Kickpoints dated in the future, at most [`Kickpoint::FUTURE_LIMIT`]
    #[instrument(skip(self))]
    pub async fn future_for_player(&self, player_tag: &Tag) -> ServiceResult<Vec<KickpointResponse>> {
        let kickpoints = self
            .ctx
            .kickpoint_repo()
            .list_future_by_player(player_tag, self.ctx.now(), Kickpoint::FUTURE_LIMIT)
            .await?;
        non_empty(player_tag, kickpoints)
    }

    /// Active and lifetime sums; both are 0 for a player without kickpoints
    #[instrument(skip(self))]
    pub async fn summary_for_player(
        &self,
        player_tag: &Tag,
    ) -> ServiceResult<KickpointSummaryResponse> {
        let repo = self.ctx.kickpoint_repo();
        let active_sum = repo.active_sum_by_player(player_tag, self.ctx.now()).await?;
        let lifetime_sum = repo.lifetime_sum_by_player(player_tag).await?;

        Ok(KickpointSummaryResponse {
            player_tag: player_tag.to_string(),
            active_sum,
            lifetime_sum,
        })
    }

    /// Active sums per current member, highest first. Empty is `NoKickpoints`.
    #[instrument(skip(self))]
    pub async fn active_for_clan(&self, clan_tag: &Tag) -> ServiceResult<Vec<ClanKickpointsResponse>> {
        find_clan(self.ctx, clan_tag).await?;
        let settings = self.ctx.settings_repo().find_or_default(clan_tag).await?;

        let rows = self
            .ctx
            .kickpoint_repo()
            .active_sums_by_clan(&settings, self.ctx.now())
            .await?;

        if rows.is_empty() {
            return Err(DomainError::NoKickpoints(clan_tag.clone()).into());
        }
        Ok(rows.into_iter().map(ClanKickpointsResponse::from).collect())
    }

    async fn find_details(&self, id: i64) -> ServiceResult<KickpointDetails> {
        self.ctx
            .kickpoint_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::KickpointNotFound(id).into())
    }
}

fn non_empty(tag: &Tag, kickpoints: Vec<Kickpoint>) -> ServiceResult<Vec<KickpointResponse>> {
    if kickpoints.is_empty() {
        return Err(DomainError::NoKickpoints(tag.clone()).into());
    }
    Ok(kickpoints.into_iter().map(KickpointResponse::from).collect())
}
