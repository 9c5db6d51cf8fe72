//! Read-only views of live game data

use serde::{Deserialize, Serialize};

use crate::value_objects::{ClanRole, Tag};

/// Live state of a clan as reported by the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanSnapshot {
    pub tag: Tag,
    pub name: String,
    pub members: Vec<ClanSnapshotMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanSnapshotMember {
    pub tag: Tag,
    pub name: String,
    pub role: ClanRole,
}

/// Whether a player has opted into wars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarPreference {
    In,
    Out,
}

/// One entry of a war roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarParticipant {
    pub tag: Tag,
    pub name: String,
    pub war_preference: WarPreference,
    /// 1-based position on the war map
    pub map_position: i32,
}

impl WarParticipant {
    #[inline]
    pub fn is_opted_in(&self) -> bool {
        self.war_preference == WarPreference::In
    }
}
