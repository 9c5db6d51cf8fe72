//! Outbound collaborators: the game data API and chat-platform roles

mod clash;
mod discord;
mod noop;

pub use clash::ClashApiClient;
pub use discord::DiscordRoleSink;
pub use noop::NoopRoleSink;
