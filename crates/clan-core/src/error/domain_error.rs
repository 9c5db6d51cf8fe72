//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AuthRole, ClanRole, Tag};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Player not found: {0}")]
    PlayerNotFound(Tag),

    #[error("Clan not found: {0}")]
    ClanNotFound(Tag),

    #[error("Player {player_tag} is not a member of clan {clan_tag}")]
    MemberNotFound { player_tag: Tag, clan_tag: Tag },

    #[error("Player {0} is not in any clan")]
    NoActiveMembership(Tag),

    #[error("Kickpoint not found: {0}")]
    KickpointNotFound(i64),

    #[error("No kickpoints found for {0}")]
    NoKickpoints(Tag),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Kickpoint amount must be positive, got {0}")]
    InvalidAmount(i32),

    #[error("Member already has role {0}")]
    RoleUnchanged(ClanRole),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role {required} required in clan {clan_tag}")]
    Unauthorized { clan_tag: Tag, required: AuthRole },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Player {0} is already a member of a clan")]
    AlreadyMember(Tag),

    #[error("Clan already exists: {0}")]
    ClanAlreadyExists(Tag),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Kickpoints are locked for player {player_tag} in clan {clan_tag}")]
    KickpointsLocked { player_tag: Tag, clan_tag: Tag },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PlayerNotFound(_) => "UNKNOWN_PLAYER",
            Self::ClanNotFound(_) => "UNKNOWN_CLAN",
            Self::MemberNotFound { .. } => "UNKNOWN_MEMBER",
            Self::NoActiveMembership(_) => "NO_ACTIVE_MEMBERSHIP",
            Self::KickpointNotFound(_) => "UNKNOWN_KICKPOINT",
            Self::NoKickpoints(_) => "NO_KICKPOINTS",

            // Validation
            Self::InvalidInput(_) => "VALIDATION_ERROR",
            Self::InvalidTag(_) => "INVALID_TAG",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::RoleUnchanged(_) => "ROLE_UNCHANGED",

            // Authorization
            Self::Unauthorized { .. } => "MISSING_ROLE",

            // Conflict
            Self::AlreadyMember(_) => "ALREADY_MEMBER",
            Self::ClanAlreadyExists(_) => "CLAN_ALREADY_EXISTS",

            // Business Rules
            Self::KickpointsLocked { .. } => "KICKPOINTS_LOCKED",

            // Infrastructure
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlayerNotFound(_)
                | Self::ClanNotFound(_)
                | Self::MemberNotFound { .. }
                | Self::NoActiveMembership(_)
                | Self::KickpointNotFound(_)
                | Self::NoKickpoints(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidTag(_)
                | Self::InvalidRole(_)
                | Self::InvalidAmount(_)
                | Self::RoleUnchanged(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMember(_) | Self::ClanAlreadyExists(_) | Self::KickpointsLocked { .. }
        )
    }
}

impl From<crate::value_objects::TagParseError> for DomainError {
    fn from(err: crate::value_objects::TagParseError) -> Self {
        Self::InvalidTag(err.to_string())
    }
}

impl From<crate::value_objects::RoleParseError> for DomainError {
    fn from(err: crate::value_objects::RoleParseError) -> Self {
        Self::InvalidRole(err.0)
    }
}
