//! # clan-core
//!
//! Domain layer containing entities, value objects, the authorization rules,
//! donator selection, repository traits, and the collaborator traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod authorization;
pub mod donators;
pub mod entities;
pub mod error;
pub mod outcome;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use authorization::{authorize, required_role, CallerRoles, MemberAction};
pub use donators::{
    donator_ranges, select_donators, DonatorAssignment, DonatorCandidate, DonatorRange,
    DonatorSelection, DONATOR_CHUNK_SIZE,
};
pub use entities::{
    Clan, ClanMember, ClanMemberKickpoints, ClanSettings, ClanSnapshot, ClanSnapshotMember,
    Kickpoint, KickpointChanges, KickpointDetails, MemberProfile, MemberState, NewKickpoint,
    Player, WarParticipant, WarPreference,
};
pub use error::DomainError;
pub use outcome::{Outcome, SideEffect, SideEffectWarning};
pub use traits::{
    ClanRepository, ClanSettingsRepository, Clock, GameDataOracle, HealthCheck,
    KickpointRepository, MemberRepository, MemberStateRepository, PlayerRepository, RepoResult,
    RoleSink, SystemClock,
};
pub use value_objects::{AuthRole, ClanRole, RoleParseError, Tag, TagParseError};
