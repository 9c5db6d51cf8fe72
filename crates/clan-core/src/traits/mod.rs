//! Ports - traits implemented by the infrastructure layer

mod collaborators;
mod repositories;

pub use collaborators::{Clock, GameDataOracle, RoleSink, SystemClock};
pub use repositories::{
    ClanRepository, ClanSettingsRepository, HealthCheck, KickpointRepository, MemberRepository,
    MemberStateRepository, PlayerRepository, RepoResult,
};
