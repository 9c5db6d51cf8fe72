//! Database models - SQLx-compatible structs for PostgreSQL tables

mod clan;
mod kickpoint;
mod member;
mod player;

pub use clan::{ClanModel, ClanSettingsModel};
pub use kickpoint::{ClanKickpointSumModel, KickpointDetailsModel, KickpointModel};
pub use member::{ClanMemberModel, MemberProfileModel, MemberStateModel};
pub use player::PlayerModel;
