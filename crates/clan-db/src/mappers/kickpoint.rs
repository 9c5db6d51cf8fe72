//! Kickpoint entity <-> model mapping

use chrono::{DateTime, Utc};
use clan_core::entities::{
    ClanMemberKickpoints, ClanSettings, Kickpoint, KickpointDetails, NewKickpoint,
};
use clan_core::error::DomainError;

use crate::models::{ClanKickpointSumModel, KickpointDetailsModel, KickpointModel};

use super::stored_tag;

impl TryFrom<KickpointModel> for Kickpoint {
    type Error = DomainError;

    fn try_from(model: KickpointModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            player_tag: stored_tag(&model.player_tag)?,
            clan_tag: stored_tag(&model.clan_tag)?,
            amount: model.amount,
            description: model.description,
            date: model.date,
            expires_at: model.expires_at,
            created_by: model.created_by_discord_id,
            updated_by: model.updated_by_discord_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<KickpointDetailsModel> for KickpointDetails {
    type Error = DomainError;

    fn try_from(model: KickpointDetailsModel) -> Result<Self, Self::Error> {
        Ok(Self {
            kickpoint: Kickpoint::try_from(model.kickpoint)?,
            player_name: model.player_name,
            clan_name: model.clan_name,
        })
    }
}

/// Build the clan overview rows, flagging members at or over the ceiling
pub fn clan_kickpoint_sums(
    models: Vec<ClanKickpointSumModel>,
    settings: &ClanSettings,
) -> Result<Vec<ClanMemberKickpoints>, DomainError> {
    models
        .into_iter()
        .map(|model| {
            Ok(ClanMemberKickpoints {
                player_tag: stored_tag(&model.player_tag)?,
                player_name: model.player_name,
                at_or_over_ceiling: settings.is_at_or_over_ceiling(model.amount),
                amount: model.amount,
            })
        })
        .collect()
}

/// Data for inserting a kickpoint
#[derive(Debug)]
pub struct KickpointInsert<'a> {
    pub player_tag: &'a str,
    pub clan_tag: &'a str,
    pub date: DateTime<Utc>,
    pub amount: i32,
    pub description: &'a str,
    pub created_by_discord_id: &'a str,
    pub expires_at: DateTime<Utc>,
}

impl<'a> KickpointInsert<'a> {
    pub fn new(kickpoint: &'a NewKickpoint, expires_at: DateTime<Utc>) -> Self {
        Self {
            player_tag: kickpoint.player_tag.as_str(),
            clan_tag: kickpoint.clan_tag.as_str(),
            date: kickpoint.date,
            amount: kickpoint.amount,
            description: &kickpoint.description,
            created_by_discord_id: &kickpoint.created_by,
            expires_at,
        }
    }
}
