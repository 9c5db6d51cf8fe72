//! Kickpoint database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the kickpoints table
#[derive(Debug, Clone, FromRow)]
pub struct KickpointModel {
    pub id: i64,
    pub player_tag: String,
    pub clan_tag: String,
    pub date: DateTime<Utc>,
    pub amount: i32,
    pub description: String,
    pub created_by_discord_id: String,
    pub updated_by_discord_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Kickpoint joined with player and clan names
#[derive(Debug, Clone, FromRow)]
pub struct KickpointDetailsModel {
    #[sqlx(flatten)]
    pub kickpoint: KickpointModel,
    pub player_name: String,
    pub clan_name: String,
}

/// Active kickpoint sum of one clan member
#[derive(Debug, Clone, FromRow)]
pub struct ClanKickpointSumModel {
    pub player_tag: String,
    pub player_name: String,
    pub amount: i64,
}
