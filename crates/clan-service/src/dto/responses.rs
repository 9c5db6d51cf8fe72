//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use clan_core::{ClanRole, SideEffectWarning};
use serde::Serialize;

// ============================================================================
// Wrappers
// ============================================================================

/// Result of a mutation whose side effects may have partly failed
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SideEffectWarning>,
}

// ============================================================================
// Registry Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub tag: String,
    pub name: String,
    pub discord_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClanResponse {
    pub tag: String,
    pub name: String,
    pub index: i32,
}

/// Clan together with its kickpoint policy
#[derive(Debug, Clone, Serialize)]
pub struct ClanDetailsResponse {
    #[serde(flatten)]
    pub clan: ClanResponse,
    pub settings: SettingsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub clan_tag: String,
    pub kickpoint_ceiling: i32,
    pub min_season_wins: i32,
    pub kickpoint_expiry_days: i32,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Membership without player data
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub player_tag: String,
    pub clan_tag: String,
    pub role: ClanRole,
    pub added_by: String,
    pub joined_at: DateTime<Utc>,
}

/// Membership with its player
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    #[serde(flatten)]
    pub membership: MembershipResponse,
    pub player: PlayerResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct KickpointLockResponse {
    pub player_tag: String,
    pub clan_tag: String,
    pub kickpoint_lock: bool,
}

/// In-game clan member that is not stored
#[derive(Debug, Clone, Serialize)]
pub struct GameMemberResponse {
    pub tag: String,
    pub name: String,
    pub role: ClanRole,
}

/// Stored roster compared with the in-game roster
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatusResponse {
    pub clan_tag: String,
    /// Stored members no longer in the clan in game
    pub missing_in_game: Vec<PlayerResponse>,
    /// In-game members without a stored membership
    pub not_registered: Vec<GameMemberResponse>,
}

// ============================================================================
// Kickpoint Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct KickpointResponse {
    pub id: i64,
    pub player_tag: String,
    pub clan_tag: String,
    pub amount: i32,
    pub description: String,
    pub date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clan_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KickpointSummaryResponse {
    pub player_tag: String,
    pub active_sum: i64,
    pub lifetime_sum: i64,
}

/// One row of a clan's active kickpoint overview
#[derive(Debug, Clone, Serialize)]
pub struct ClanKickpointsResponse {
    pub player_tag: String,
    pub player_name: String,
    pub amount: i64,
    pub at_or_over_ceiling: bool,
}

// ============================================================================
// Donator Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DonatorRangeResponse {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonatorResponse {
    pub range: DonatorRangeResponse,
    pub tag: String,
    pub name: String,
    pub map_position: i32,
    pub discord_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DonatorsResponse {
    Assigned {
        donators: Vec<DonatorResponse>,
        unassigned: Vec<DonatorRangeResponse>,
    },
    NoCandidates {
        message: String,
    },
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
