//! Kickpoint entity - a disciplinary record with its own expiry

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Tag;

/// A recorded kickpoint.
///
/// Whether a kickpoint is active is always computed against a caller
/// supplied `now`, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kickpoint {
    pub id: i64,
    pub player_tag: Tag,
    pub clan_tag: Tag,
    pub amount: i32,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Fixed from the clan policy in effect when the record was written
    pub expires_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Kickpoint {
    pub const MAX_DESCRIPTION_LEN: usize = 100;

    /// Maximum number of future kickpoints returned per player
    pub const FUTURE_LIMIT: i64 = 20;

    /// Active iff `date <= now < expires_at`
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.date <= now && now < self.expires_at
    }

    /// Dated after `now`
    #[inline]
    pub fn is_future_at(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }
}

/// Input for recording a kickpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKickpoint {
    pub player_tag: Tag,
    pub clan_tag: Tag,
    pub amount: i32,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_by: String,
}

impl NewKickpoint {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)?;
        validate_description(&self.description)
    }
}

/// Partial update of a kickpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KickpointChanges {
    pub amount: Option<i32>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl KickpointChanges {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.description.is_none() && self.date.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }

    /// Apply the changes to a copy of `kickpoint`
    pub fn apply_to(&self, kickpoint: &Kickpoint) -> Kickpoint {
        let mut updated = kickpoint.clone();
        if let Some(amount) = self.amount {
            updated.amount = amount;
        }
        if let Some(description) = &self.description {
            updated.description.clone_from(description);
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        updated
    }
}

/// Kickpoint joined with the names of its player and clan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickpointDetails {
    pub kickpoint: Kickpoint,
    pub player_name: String,
    pub clan_name: String,
}

/// One row of a clan's active kickpoint overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanMemberKickpoints {
    pub player_tag: Tag,
    pub player_name: String,
    pub amount: i64,
    pub at_or_over_ceiling: bool,
}

fn validate_amount(amount: i32) -> Result<(), DomainError> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount(amount));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > Kickpoint::MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvalidInput(format!(
            "description is longer than {} characters",
            Kickpoint::MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
