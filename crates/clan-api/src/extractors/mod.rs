//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path tags.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{ClanMemberPath, ClanPath, IdPath, PlayerPath};
pub use validated::ValidatedJson;
