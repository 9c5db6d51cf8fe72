//! Membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the clan_members table
#[derive(Debug, Clone, FromRow)]
pub struct ClanMemberModel {
    pub player_tag: String,
    pub clan_tag: String,
    pub clan_role: String,
    pub added_by_discord_id: String,
    pub created_at: DateTime<Utc>,
}

/// Membership joined with its player row
#[derive(Debug, Clone, FromRow)]
pub struct MemberProfileModel {
    #[sqlx(flatten)]
    pub member: ClanMemberModel,
    pub player_name: String,
    pub discord_id: Option<String>,
}

/// Database model for the member_states table
#[derive(Debug, Clone, FromRow)]
pub struct MemberStateModel {
    pub player_tag: String,
    pub clan_tag: String,
    pub kickpoint_lock: bool,
}
