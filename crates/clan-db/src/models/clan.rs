//! Clan database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the clans table
#[derive(Debug, Clone, FromRow)]
pub struct ClanModel {
    pub tag: String,
    pub name: String,
    pub sort_index: i32,
}

/// Database model for the clan_settings table
#[derive(Debug, Clone, FromRow)]
pub struct ClanSettingsModel {
    pub clan_tag: String,
    pub max_kickpoints: i32,
    pub min_season_wins: i32,
    pub kickpoints_expire_after_days: i32,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by_discord_id: Option<String>,
}
