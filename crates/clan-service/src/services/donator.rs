//! Donator service
//!
//! Picks one war donator per range of map positions.

use std::collections::HashMap;

use clan_core::{select_donators, Tag};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::dto::DonatorsResponse;

use super::clan::find_clan;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct DonatorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DonatorService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Draw donators for the clan's current war
    pub async fn select(&self, clan_tag: &Tag) -> ServiceResult<DonatorsResponse> {
        self.select_with_rng(clan_tag, &mut StdRng::from_entropy())
            .await
    }

    /// Same as [`select`](Self::select) with a caller-supplied random source
    #[instrument(skip(self, rng))]
    pub async fn select_with_rng<R: Rng + Send + ?Sized>(
        &self,
        clan_tag: &Tag,
        rng: &mut R,
    ) -> ServiceResult<DonatorsResponse> {
        find_clan(self.ctx, clan_tag).await?;

        let roster = self.ctx.oracle().get_war_roster(clan_tag).await?;
        let accounts: HashMap<Tag, String> = self
            .ctx
            .member_repo()
            .list_by_clan(clan_tag)
            .await?
            .into_iter()
            .filter_map(|p| p.player.discord_id.map(|id| (p.member.player_tag, id)))
            .collect();

        let selection = select_donators(&roster, &accounts, rng);

        info!(clan_tag = %clan_tag, roster_size = roster.len(), "Donators selected");
        Ok(selection.into())
    }
}
