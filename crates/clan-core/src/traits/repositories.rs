//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Time-dependent queries take `now` as an argument so that the caller's
//! clock decides what is active.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Clan, ClanMember, ClanMemberKickpoints, ClanSettings, Kickpoint, KickpointChanges,
    KickpointDetails, MemberProfile, MemberState, NewKickpoint, Player,
};
use crate::error::DomainError;
use crate::value_objects::{ClanRole, Tag};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Player Repository
// ============================================================================

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn find_by_tag(&self, tag: &Tag) -> RepoResult<Option<Player>>;

    /// Insert the player or update its name and link
    async fn upsert(&self, player: &Player) -> RepoResult<()>;
}

// ============================================================================
// Clan Repository
// ============================================================================

#[async_trait]
pub trait ClanRepository: Send + Sync {
    async fn find_by_tag(&self, tag: &Tag) -> RepoResult<Option<Clan>>;

    /// All clans ordered by index
    async fn list(&self) -> RepoResult<Vec<Clan>>;

    /// Fails with `ClanAlreadyExists` if the tag is taken
    async fn create(&self, clan: &Clan) -> RepoResult<()>;
}

// ============================================================================
// Clan Settings Repository
// ============================================================================

#[async_trait]
pub trait ClanSettingsRepository: Send + Sync {
    /// Stored settings, or the defaults when none were saved yet
    async fn find_or_default(&self, clan_tag: &Tag) -> RepoResult<ClanSettings>;

    /// Insert or replace the clan's settings
    async fn save(&self, settings: &ClanSettings) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a membership.
    ///
    /// Fails with `AlreadyMember` if the player already belongs to any clan,
    /// `PlayerNotFound` or `ClanNotFound` if either side is unknown.
    async fn create(&self, member: &ClanMember) -> RepoResult<()>;

    /// Delete a membership; `MemberNotFound` if absent
    async fn delete(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<()>;

    /// Find a membership together with its player
    async fn find(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<Option<MemberProfile>>;

    /// The player's single membership, if any
    async fn find_current(&self, player_tag: &Tag) -> RepoResult<Option<ClanMember>>;

    /// Members of a clan, highest role first, then by name
    async fn list_by_clan(&self, clan_tag: &Tag) -> RepoResult<Vec<MemberProfile>>;

    /// Memberships of every player linked to a chat account
    async fn list_by_discord_id(&self, discord_id: &str) -> RepoResult<Vec<ClanMember>>;

    /// Set a member's role; `MemberNotFound` if absent
    async fn update_role(&self, player_tag: &Tag, clan_tag: &Tag, role: ClanRole)
        -> RepoResult<()>;

    /// Move a player from one clan to another as one atomic unit.
    ///
    /// Either both the removal from `from` and the insert into `member.clan_tag`
    /// happen, or neither does.
    async fn transfer(&self, from: &Tag, member: &ClanMember) -> RepoResult<()>;
}

// ============================================================================
// Kickpoint Repository
// ============================================================================

#[async_trait]
pub trait KickpointRepository: Send + Sync {
    async fn create(
        &self,
        kickpoint: &NewKickpoint,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RepoResult<Kickpoint>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<KickpointDetails>>;

    /// Apply changes and store the recomputed expiry.
    /// `KickpointNotFound` if absent.
    async fn update(
        &self,
        id: i64,
        changes: &KickpointChanges,
        expires_at: DateTime<Utc>,
        updated_by: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// `KickpointNotFound` if absent
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Kickpoints with `date <= now < expires_at`, oldest first
    async fn list_active_by_player(
        &self,
        player_tag: &Tag,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Kickpoint>>;

    /// Sum over the same window as `list_active_by_player`; 0 when empty
    async fn active_sum_by_player(&self, player_tag: &Tag, now: DateTime<Utc>) -> RepoResult<i64>;

    /// Active sums of the clan's current members over all their kickpoints,
    /// whichever clan issued them, highest first
    async fn active_sums_by_clan(
        &self,
        settings: &ClanSettings,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<ClanMemberKickpoints>>;

    /// Sum of every kickpoint the player ever received; 0 when empty
    async fn lifetime_sum_by_player(&self, player_tag: &Tag) -> RepoResult<i64>;

    /// Kickpoints dated after `now`, oldest first
    async fn list_future_by_player(
        &self,
        player_tag: &Tag,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Kickpoint>>;
}

// ============================================================================
// Member State Repository
// ============================================================================

#[async_trait]
pub trait MemberStateRepository: Send + Sync {
    /// Stored state, or an unlocked state when none was saved
    async fn find_or_default(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<MemberState>;

    async fn set_kickpoint_lock(
        &self,
        player_tag: &Tag,
        clan_tag: &Tag,
        locked: bool,
    ) -> RepoResult<()>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trip to the store
    async fn ping(&self) -> RepoResult<()>;
}
