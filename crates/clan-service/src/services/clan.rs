//! Clan service
//!
//! Clan registry: listing, lookup and registration.

use clan_core::entities::Clan;
use clan_core::{DomainError, Tag};
use tracing::{info, instrument};

use crate::dto::{ClanDetailsResponse, ClanResponse, CreateClanRequest};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ClanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClanService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All clans by display index
    #[instrument(skip(self))]
    pub async fn list_clans(&self) -> ServiceResult<Vec<ClanResponse>> {
        let clans = self.ctx.clan_repo().list().await?;
        Ok(clans.into_iter().map(ClanResponse::from).collect())
    }

    /// A clan together with its current policy
    #[instrument(skip(self))]
    pub async fn get_clan(&self, clan_tag: &Tag) -> ServiceResult<ClanDetailsResponse> {
        let clan = find_clan(self.ctx, clan_tag).await?;
        let settings = self.ctx.settings_repo().find_or_default(clan_tag).await?;

        Ok(ClanDetailsResponse {
            clan: clan.into(),
            settings: settings.into(),
        })
    }

    /// Register a clan. Admin only.
    #[instrument(skip(self, request))]
    pub async fn create_clan(
        &self,
        actor_id: &str,
        request: CreateClanRequest,
    ) -> ServiceResult<ClanResponse> {
        let tag = Tag::parse(&request.tag)?;
        AuthorizationService::new(self.ctx).require_admin(actor_id, &tag)?;

        let clan = Clan::new(tag, request.name, request.index);
        self.ctx.clan_repo().create(&clan).await?;

        info!(clan_tag = %clan.tag, name = %clan.name, "Clan registered");
        Ok(clan.into())
    }
}

/// Load a clan or fail with `ClanNotFound`
pub(crate) async fn find_clan(ctx: &ServiceContext, clan_tag: &Tag) -> ServiceResult<Clan> {
    ctx.clan_repo()
        .find_by_tag(clan_tag)
        .await?
        .ok_or_else(|| DomainError::ClanNotFound(clan_tag.clone()).into())
}
