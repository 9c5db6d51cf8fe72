//! Donator selection for clan wars
//!
//! The war map is split into contiguous ranges of at most
//! [`DONATOR_CHUNK_SIZE`] positions, and each range is given one donator
//! drawn at random from the participants who opted into war.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::WarParticipant;
use crate::value_objects::Tag;

pub const DONATOR_CHUNK_SIZE: usize = 10;

/// Inclusive range of war map positions, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonatorRange {
    pub start: usize,
    pub end: usize,
}

impl DonatorRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonatorCandidate {
    pub tag: Tag,
    pub name: String,
    pub map_position: i32,
    /// Linked chat account of the participant, if stored as a member
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonatorAssignment {
    pub range: DonatorRange,
    pub donator: DonatorCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonatorSelection {
    /// Every assigned range has a distinct donator. `unassigned` holds the
    /// ranges left over when fewer participants opted in than there are
    /// ranges.
    Assigned {
        assignments: Vec<DonatorAssignment>,
        unassigned: Vec<DonatorRange>,
    },
    /// Nobody on the roster opted into war
    NoCandidates,
}

/// Split `roster_size` positions into balanced ranges of at most
/// [`DONATOR_CHUNK_SIZE`]
pub fn donator_ranges(roster_size: usize) -> Vec<DonatorRange> {
    if roster_size == 0 {
        return Vec::new();
    }
    let num_ranges = roster_size.div_ceil(DONATOR_CHUNK_SIZE);
    let range_size = roster_size.div_ceil(num_ranges);

    (0..num_ranges)
        .map(|i| DonatorRange {
            start: i * range_size + 1,
            end: ((i + 1) * range_size).min(roster_size),
        })
        .filter(|range| !range.is_empty())
        .collect()
}

/// Assign one distinct opted-in participant to each range.
///
/// `accounts` maps player tags to linked chat accounts.
pub fn select_donators<R: Rng + ?Sized>(
    roster: &[WarParticipant],
    accounts: &HashMap<Tag, String>,
    rng: &mut R,
) -> DonatorSelection {
    let mut pool: Vec<DonatorCandidate> = roster
        .iter()
        .filter(|p| p.is_opted_in())
        .map(|p| DonatorCandidate {
            tag: p.tag.clone(),
            name: p.name.clone(),
            map_position: p.map_position,
            account_id: accounts.get(&p.tag).cloned(),
        })
        .collect();

    if pool.is_empty() {
        return DonatorSelection::NoCandidates;
    }

    pool.shuffle(rng);

    let mut ranges = donator_ranges(roster.len()).into_iter();
    let assignments = ranges
        .by_ref()
        .zip(pool)
        .map(|(range, donator)| DonatorAssignment { range, donator })
        .collect();

    DonatorSelection::Assigned {
        assignments,
        unassigned: ranges.collect(),
    }
}
