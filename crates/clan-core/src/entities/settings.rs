//! Clan settings - the per-clan kickpoint policy

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::Tag;

/// Kickpoint policy of one clan.
///
/// A clan without stored settings uses [`ClanSettings::defaults`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanSettings {
    pub clan_tag: Tag,
    /// Active kickpoint sum at which a member is flagged
    pub kickpoint_ceiling: i32,
    pub min_season_wins: i32,
    /// Lifetime of a kickpoint, counted from its date
    pub kickpoint_expiry_days: i32,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl ClanSettings {
    pub const DEFAULT_KICKPOINT_CEILING: i32 = 6;
    pub const DEFAULT_MIN_SEASON_WINS: i32 = 80;
    pub const DEFAULT_KICKPOINT_EXPIRY_DAYS: i32 = 45;

    pub fn defaults(clan_tag: Tag) -> Self {
        Self {
            clan_tag,
            kickpoint_ceiling: Self::DEFAULT_KICKPOINT_CEILING,
            min_season_wins: Self::DEFAULT_MIN_SEASON_WINS,
            kickpoint_expiry_days: Self::DEFAULT_KICKPOINT_EXPIRY_DAYS,
            updated_at: None,
            updated_by: None,
        }
    }

    /// Expiry of a kickpoint dated `date` under this policy.
    ///
    /// Fails with `InvalidInput` when the expiry is past the representable
    /// date range.
    pub fn expires_at(&self, date: DateTime<Utc>) -> Result<DateTime<Utc>, DomainError> {
        date.checked_add_signed(Duration::days(i64::from(self.kickpoint_expiry_days)))
            .ok_or_else(|| {
                DomainError::InvalidInput(format!("kickpoint date {date} is too far in the future"))
            })
    }

    /// Check if an active sum reaches the ceiling
    #[inline]
    pub fn is_at_or_over_ceiling(&self, active_sum: i64) -> bool {
        active_sum >= i64::from(self.kickpoint_ceiling)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.kickpoint_ceiling < 1 {
            return Err(DomainError::InvalidInput(
                "kickpoint ceiling must be at least 1".to_string(),
            ));
        }
        if self.kickpoint_expiry_days < 1 {
            return Err(DomainError::InvalidInput(
                "kickpoint expiry must be at least 1 day".to_string(),
            ));
        }
        if self.min_season_wins < 0 {
            return Err(DomainError::InvalidInput(
                "minimum season wins cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
