//! Value objects - immutable types that represent domain concepts

mod roles;
mod tag;

pub use roles::{AuthRole, ClanRole, RoleParseError};
pub use tag::{Tag, TagParseError};
