//! # clan-service
//!
//! Application layer containing business logic, services, DTOs, and the
//! outbound clients for game data and chat roles.

pub mod clients;
pub mod dto;
pub mod services;

pub use clients::{ClashApiClient, DiscordRoleSink, NoopRoleSink};
pub use dto::*;
pub use services::*;
