//! Member entity - a player's membership in a clan

use chrono::{DateTime, Utc};

use crate::entities::Player;
use crate::value_objects::{ClanRole, Tag};

/// Clan membership. A player holds at most one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanMember {
    pub player_tag: Tag,
    pub clan_tag: Tag,
    pub role: ClanRole,
    /// Account id of whoever added the member
    pub added_by: String,
    pub joined_at: DateTime<Utc>,
}

impl ClanMember {
    pub fn new(
        player_tag: Tag,
        clan_tag: Tag,
        role: ClanRole,
        added_by: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_tag,
            clan_tag,
            role,
            added_by: added_by.into(),
            joined_at,
        }
    }
}

/// Membership joined with its player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub member: ClanMember,
    pub player: Player,
}

/// Per-member flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberState {
    pub player_tag: Tag,
    pub clan_tag: Tag,
    /// While set, no kickpoints can be recorded for the member
    pub kickpoint_lock: bool,
}

impl MemberState {
    pub fn unlocked(player_tag: Tag, clan_tag: Tag) -> Self {
        Self {
            player_tag,
            clan_tag,
            kickpoint_lock: false,
        }
    }
}
