//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod authorization;
pub mod clan;
pub mod context;
pub mod donator;
pub mod error;
pub mod kickpoint;
pub mod member;
pub mod player;
mod role_sync;
pub mod settings;

// Re-export all services for convenience
pub use authorization::AuthorizationService;
pub use clan::ClanService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use donator::DonatorService;
pub use error::{ServiceError, ServiceResult};
pub use kickpoint::KickpointService;
pub use member::MemberService;
pub use player::PlayerService;
pub use settings::SettingsService;
