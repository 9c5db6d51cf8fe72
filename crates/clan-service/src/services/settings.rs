//! Settings service
//!
//! Per-clan kickpoint policy. A clan without stored settings reports the
//! defaults; the first update stores a row.

use clan_core::{AuthRole, Tag};
use tracing::{info, instrument};

use crate::dto::{SettingsResponse, UpdateSettingsRequest};

use super::authorization::AuthorizationService;
use super::clan::find_clan;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_settings(&self, clan_tag: &Tag) -> ServiceResult<SettingsResponse> {
        find_clan(self.ctx, clan_tag).await?;
        Ok(self.ctx.settings_repo().find_or_default(clan_tag).await?.into())
    }

    /// Change the policy. Needs `Leader`; existing kickpoints keep their expiry.
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        clan_tag: &Tag,
        actor_id: &str,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<SettingsResponse> {
        AuthorizationService::new(self.ctx)
            .require(actor_id, clan_tag, AuthRole::Leader)
            .await?;
        find_clan(self.ctx, clan_tag).await?;

        let mut settings = self.ctx.settings_repo().find_or_default(clan_tag).await?;
        if let Some(ceiling) = request.kickpoint_ceiling {
            settings.kickpoint_ceiling = ceiling;
        }
        if let Some(wins) = request.min_season_wins {
            settings.min_season_wins = wins;
        }
        if let Some(days) = request.kickpoint_expiry_days {
            settings.kickpoint_expiry_days = days;
        }
        settings.updated_at = Some(self.ctx.now());
        settings.updated_by = Some(actor_id.to_string());
        settings.validate()?;

        self.ctx.settings_repo().save(&settings).await?;

        info!(
            clan_tag = %clan_tag,
            kickpoint_ceiling = settings.kickpoint_ceiling,
            kickpoint_expiry_days = settings.kickpoint_expiry_days,
            "Clan settings updated"
        );
        Ok(settings.into())
    }
}
