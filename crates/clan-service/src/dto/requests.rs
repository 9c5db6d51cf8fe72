//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Tags arrive as strings and are normalized by the services.

use chrono::{DateTime, Utc};
use clan_core::entities::Player;
use clan_core::ClanRole;
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Registry Requests
// ============================================================================

/// Register a clan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClanRequest {
    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub tag: String,

    #[validate(length(min = 1, max = 50, message = "Clan name must be 1-50 characters"))]
    pub name: String,

    /// Display position among the clans
    #[serde(default)]
    pub index: i32,
}

/// Create or update a player
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertPlayerRequest {
    #[validate(length(min = 1, max = 50, message = "Player name must be 1-50 characters"))]
    pub name: String,

    /// Linked chat account, or null to unlink
    #[validate(
        length(min = 1, max = 32, message = "Account id must be 1-32 characters"),
        custom(function = "validate_discord_id")
    )]
    pub discord_id: Option<String>,
}

fn validate_discord_id(id: &str) -> Result<(), ValidationError> {
    if Player::is_valid_discord_id(id) {
        Ok(())
    } else {
        Err(ValidationError::new("discord_id").with_message("Account id must be numeric".into()))
    }
}

// ============================================================================
// Settings Requests
// ============================================================================

/// Partial update of a clan's kickpoint policy
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(range(min = 1, message = "Kickpoint ceiling must be at least 1"))]
    pub kickpoint_ceiling: Option<i32>,

    #[validate(range(min = 0, message = "Minimum season wins cannot be negative"))]
    pub min_season_wins: Option<i32>,

    #[validate(range(min = 1, max = 3650, message = "Expiry must be 1-3650 days"))]
    pub kickpoint_expiry_days: Option<i32>,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Add a player to a clan
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub player_tag: String,

    pub role: ClanRole,
}

/// Change a member's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    pub role: ClanRole,
}

/// Move a player between clans
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferMemberRequest {
    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub player_tag: String,

    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub from_clan_tag: String,

    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub to_clan_tag: String,

    pub role: ClanRole,
}

// ============================================================================
// Kickpoint Requests
// ============================================================================

/// Give a member kickpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateKickpointRequest {
    #[validate(length(min = 1, max = 16, message = "Tag must be 1-16 characters"))]
    pub player_tag: String,

    pub amount: i32,

    #[validate(length(min = 1, max = 100, message = "Description must be 1-100 characters"))]
    pub description: String,

    /// Date of the offence; defaults to now
    pub date: Option<DateTime<Utc>>,
}

/// Partial update of a kickpoint
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateKickpointRequest {
    pub amount: Option<i32>,

    #[validate(length(min = 1, max = 100, message = "Description must be 1-100 characters"))]
    pub description: Option<String>,

    pub date: Option<DateTime<Utc>>,
}
