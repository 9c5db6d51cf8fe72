//! Player service
//!
//! Player registry: lookup and upsert with the linked chat account.

use clan_core::entities::Player;
use clan_core::{DomainError, Tag};
use tracing::{info, instrument};

use crate::dto::{PlayerResponse, UpsertPlayerRequest};

use super::authorization::AuthorizationService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct PlayerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlayerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, tag: &Tag) -> ServiceResult<PlayerResponse> {
        let player = self
            .ctx
            .player_repo()
            .find_by_tag(tag)
            .await?
            .ok_or_else(|| DomainError::PlayerNotFound(tag.clone()))?;
        Ok(player.into())
    }

    /// Create the player or update its name and link. Admin only.
    #[instrument(skip(self, request))]
    pub async fn upsert_player(
        &self,
        tag: &Tag,
        actor_id: &str,
        request: UpsertPlayerRequest,
    ) -> ServiceResult<PlayerResponse> {
        if let Some(id) = request.discord_id.as_deref() {
            if !Player::is_valid_discord_id(id) {
                return Err(DomainError::InvalidInput(format!(
                    "account id {id:?} is not numeric"
                ))
                .into());
            }
        }

        AuthorizationService::new(self.ctx).require_admin(actor_id, tag)?;

        let player = Player {
            tag: tag.clone(),
            name: request.name,
            discord_id: request.discord_id,
        };
        self.ctx.player_repo().upsert(&player).await?;

        info!(player_tag = %tag, linked = player.is_linked(), "Player saved");
        Ok(player.into())
    }
}
