//! Clan and clan settings entity <-> model mapping

use chrono::{DateTime, Utc};
use clan_core::entities::{Clan, ClanSettings};
use clan_core::error::DomainError;

use crate::models::{ClanModel, ClanSettingsModel};

use super::stored_tag;

impl TryFrom<ClanModel> for Clan {
    type Error = DomainError;

    fn try_from(model: ClanModel) -> Result<Self, Self::Error> {
        Ok(Self {
            tag: stored_tag(&model.tag)?,
            name: model.name,
            index: model.sort_index,
        })
    }
}

impl TryFrom<ClanSettingsModel> for ClanSettings {
    type Error = DomainError;

    fn try_from(model: ClanSettingsModel) -> Result<Self, Self::Error> {
        Ok(Self {
            clan_tag: stored_tag(&model.clan_tag)?,
            kickpoint_ceiling: model.max_kickpoints,
            min_season_wins: model.min_season_wins,
            kickpoint_expiry_days: model.kickpoints_expire_after_days,
            updated_at: model.updated_at,
            updated_by: model.updated_by_discord_id,
        })
    }
}

/// Data for inserting a clan
#[derive(Debug)]
pub struct ClanInsert<'a> {
    pub tag: &'a str,
    pub name: &'a str,
    pub sort_index: i32,
}

impl<'a> From<&'a Clan> for ClanInsert<'a> {
    fn from(clan: &'a Clan) -> Self {
        Self {
            tag: clan.tag.as_str(),
            name: &clan.name,
            sort_index: clan.index,
        }
    }
}

/// Data for inserting or replacing clan settings
#[derive(Debug)]
pub struct ClanSettingsUpsert<'a> {
    pub clan_tag: &'a str,
    pub max_kickpoints: i32,
    pub min_season_wins: i32,
    pub kickpoints_expire_after_days: i32,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by_discord_id: Option<&'a str>,
}

impl<'a> From<&'a ClanSettings> for ClanSettingsUpsert<'a> {
    fn from(settings: &'a ClanSettings) -> Self {
        Self {
            clan_tag: settings.clan_tag.as_str(),
            max_kickpoints: settings.kickpoint_ceiling,
            min_season_wins: settings.min_season_wins,
            kickpoints_expire_after_days: settings.kickpoint_expiry_days,
            updated_at: settings.updated_at,
            updated_by_discord_id: settings.updated_by.as_deref(),
        }
    }
}
