//! Domain entities - core business objects

mod clan;
mod kickpoint;
mod member;
mod player;
mod settings;
mod snapshot;

pub use clan::Clan;
pub use kickpoint::{
    ClanMemberKickpoints, Kickpoint, KickpointChanges, KickpointDetails, NewKickpoint,
};
pub use member::{ClanMember, MemberProfile, MemberState};
pub use player::Player;
pub use settings::ClanSettings;
pub use snapshot::{ClanSnapshot, ClanSnapshotMember, WarParticipant, WarPreference};
