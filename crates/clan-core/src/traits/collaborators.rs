//! Traits for the collaborators around the engine: time, live game data,
//! and chat-platform roles

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ClanSnapshot, WarParticipant};
use crate::traits::RepoResult;
use crate::value_objects::Tag;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Read-only access to live game data.
///
/// Failures surface as `UpstreamUnavailable` and are not retried.
#[async_trait]
pub trait GameDataOracle: Send + Sync {
    async fn get_clan(&self, clan_tag: &Tag) -> RepoResult<ClanSnapshot>;

    /// Roster of the clan's current war
    async fn get_war_roster(&self, clan_tag: &Tag) -> RepoResult<Vec<WarParticipant>>;
}

/// Chat-platform role updates.
///
/// Calls are best-effort; callers turn failures into warnings.
#[async_trait]
pub trait RoleSink: Send + Sync {
    async fn grant_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()>;

    async fn revoke_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()>;

    async fn grant_ex_member_role(&self, account_id: &str) -> RepoResult<()>;

    async fn revoke_ex_member_role(&self, account_id: &str) -> RepoResult<()>;
}
