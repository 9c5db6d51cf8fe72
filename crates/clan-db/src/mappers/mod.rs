//! Entity to model mappers
//!
//! This module provides conversions between domain entities (clan-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects, re-validating tags
//! - `*Insert` structs: Prepare entity data for database operations

mod clan;
mod kickpoint;
mod member;
mod player;

pub use clan::{ClanInsert, ClanSettingsUpsert};
pub use kickpoint::{clan_kickpoint_sums, KickpointInsert};
pub use member::MemberInsert;
pub use player::PlayerUpsert;

use clan_core::error::DomainError;
use clan_core::value_objects::Tag;

use crate::repositories::error::corrupt_tag;

/// Parse a tag read back from the database
pub(crate) fn stored_tag(raw: &str) -> Result<Tag, DomainError> {
    Tag::parse(raw).map_err(|_| corrupt_tag(raw))
}
