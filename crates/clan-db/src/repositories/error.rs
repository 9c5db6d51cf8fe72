//! Error handling utilities for repositories

use clan_core::error::DomainError;
use clan_core::value_objects::Tag;
use sqlx::Error as SqlxError;

/// Foreign key from `clan_members` to `players`
pub const MEMBER_PLAYER_FK: &str = "clan_members_player_fk";

/// Foreign key from `clan_members` to `clans`
pub const MEMBER_CLAN_FK: &str = "clan_members_clan_fk";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Map the failure of inserting a membership.
///
/// The unique constraint on `player_tag` is the "already a member" signal;
/// foreign key violations name the missing player or clan.
pub fn map_member_insert_error(e: SqlxError, player_tag: &Tag, clan_tag: &Tag) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::AlreadyMember(player_tag.clone());
        }
        if db_err.is_foreign_key_violation() {
            return match db_err.constraint() {
                Some(MEMBER_CLAN_FK) => DomainError::ClanNotFound(clan_tag.clone()),
                _ => DomainError::PlayerNotFound(player_tag.clone()),
            };
        }
    }
    map_db_error(e)
}

/// Map a foreign key violation on a table referencing players and clans
pub fn map_player_clan_fk(e: SqlxError, player_tag: &Tag, clan_tag: &Tag) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return if constraint.contains("clan_tag") {
                DomainError::ClanNotFound(clan_tag.clone())
            } else {
                DomainError::PlayerNotFound(player_tag.clone())
            };
        }
    }
    map_db_error(e)
}

/// A stored tag that no longer parses
pub fn corrupt_tag(raw: &str) -> DomainError {
    DomainError::DatabaseError(format!("invalid tag stored: {raw}"))
}

/// A stored role that no longer parses
pub fn corrupt_role(raw: &str) -> DomainError {
    DomainError::DatabaseError(format!("invalid role stored: {raw}"))
}

pub fn member_not_found(player_tag: &Tag, clan_tag: &Tag) -> DomainError {
    DomainError::MemberNotFound {
        player_tag: player_tag.clone(),
        clan_tag: clan_tag.clone(),
    }
}
