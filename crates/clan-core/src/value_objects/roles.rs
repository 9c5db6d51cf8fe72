//! Role hierarchies
//!
//! `ClanRole` is the role a player holds inside a clan. `AuthRole` is the
//! authority a caller holds for a given clan, which extends the clan roles
//! with a global `Admin`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a player inside a clan, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClanRole {
    Member,
    #[serde(alias = "admin")]
    Elder,
    #[serde(alias = "coLeader")]
    CoLeader,
    Leader,
}

impl ClanRole {
    pub const ALL: [ClanRole; 4] = [Self::Member, Self::Elder, Self::CoLeader, Self::Leader];

    /// Stable name used in storage and over the wire
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Elder => "elder",
            Self::CoLeader => "co_leader",
            Self::Leader => "leader",
        }
    }
}

impl fmt::Display for ClanRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for ClanRole {
    type Err = RoleParseError;

    /// Accepts the stored names as well as the game's own names
    /// (`admin` is an elder, `coLeader` a co-leader).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "elder" | "admin" => Ok(Self::Elder),
            "co_leader" | "coLeader" => Ok(Self::CoLeader),
            "leader" => Ok(Self::Leader),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Authority of a caller for a clan, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthRole {
    Member,
    Elder,
    CoLeader,
    Leader,
    Admin,
}

impl AuthRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Elder => "elder",
            Self::CoLeader => "co_leader",
            Self::Leader => "leader",
            Self::Admin => "admin",
        }
    }
}

impl From<ClanRole> for AuthRole {
    fn from(role: ClanRole) -> Self {
        match role {
            ClanRole::Member => Self::Member,
            ClanRole::Elder => Self::Elder,
            ClanRole::CoLeader => Self::CoLeader,
            ClanRole::Leader => Self::Leader,
        }
    }
}

impl fmt::Display for AuthRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
