//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in clan-core.
//! Each repository handles database operations for a specific domain entity.

mod clan;
pub(crate) mod error;
mod health;
mod kickpoint;
mod member;
mod member_state;
mod player;
mod settings;

pub use clan::PgClanRepository;
pub use health::PgHealthCheck;
pub use kickpoint::PgKickpointRepository;
pub use member::PgMemberRepository;
pub use member_state::PgMemberStateRepository;
pub use player::PgPlayerRepository;
pub use settings::PgClanSettingsRepository;
