//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use clan_core::entities::{
    Clan, ClanMember, ClanMemberKickpoints, ClanSettings, ClanSnapshotMember, Kickpoint,
    KickpointDetails, MemberProfile, MemberState, Player,
};
use clan_core::{DonatorAssignment, DonatorRange, DonatorSelection, Outcome};

use super::responses::{
    ClanKickpointsResponse, ClanResponse, DonatorRangeResponse, DonatorResponse, DonatorsResponse,
    GameMemberResponse, KickpointLockResponse, KickpointResponse, MemberResponse,
    MembershipResponse, MutationResponse, PlayerResponse, SettingsResponse,
};

/// Message returned when nobody on the war roster opted in
pub const NO_DONATOR_CANDIDATES: &str = "No war participant has opted into war";

impl<T> From<Outcome<T>> for MutationResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            data: outcome.value,
            warnings: outcome.warnings,
        }
    }
}

// ============================================================================
// Registry Mappers
// ============================================================================

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            tag: player.tag.to_string(),
            name: player.name.clone(),
            discord_id: player.discord_id.clone(),
        }
    }
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            tag: player.tag.to_string(),
            name: player.name,
            discord_id: player.discord_id,
        }
    }
}

impl From<Clan> for ClanResponse {
    fn from(clan: Clan) -> Self {
        Self {
            tag: clan.tag.to_string(),
            name: clan.name,
            index: clan.index,
        }
    }
}

impl From<ClanSettings> for SettingsResponse {
    fn from(settings: ClanSettings) -> Self {
        Self {
            clan_tag: settings.clan_tag.to_string(),
            kickpoint_ceiling: settings.kickpoint_ceiling,
            min_season_wins: settings.min_season_wins,
            kickpoint_expiry_days: settings.kickpoint_expiry_days,
            updated_at: settings.updated_at,
            updated_by: settings.updated_by,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<ClanMember> for MembershipResponse {
    fn from(member: ClanMember) -> Self {
        Self {
            player_tag: member.player_tag.to_string(),
            clan_tag: member.clan_tag.to_string(),
            role: member.role,
            added_by: member.added_by,
            joined_at: member.joined_at,
        }
    }
}

impl From<MemberProfile> for MemberResponse {
    fn from(profile: MemberProfile) -> Self {
        Self {
            membership: MembershipResponse::from(profile.member),
            player: PlayerResponse::from(profile.player),
        }
    }
}

impl From<MemberState> for KickpointLockResponse {
    fn from(state: MemberState) -> Self {
        Self {
            player_tag: state.player_tag.to_string(),
            clan_tag: state.clan_tag.to_string(),
            kickpoint_lock: state.kickpoint_lock,
        }
    }
}

impl From<ClanSnapshotMember> for GameMemberResponse {
    fn from(member: ClanSnapshotMember) -> Self {
        Self {
            tag: member.tag.to_string(),
            name: member.name,
            role: member.role,
        }
    }
}

// ============================================================================
// Kickpoint Mappers
// ============================================================================

impl From<Kickpoint> for KickpointResponse {
    fn from(kp: Kickpoint) -> Self {
        Self {
            id: kp.id,
            player_tag: kp.player_tag.to_string(),
            clan_tag: kp.clan_tag.to_string(),
            amount: kp.amount,
            description: kp.description,
            date: kp.date,
            expires_at: kp.expires_at,
            created_by: kp.created_by,
            updated_by: kp.updated_by,
            created_at: kp.created_at,
            updated_at: kp.updated_at,
            player_name: None,
            clan_name: None,
        }
    }
}

impl From<KickpointDetails> for KickpointResponse {
    fn from(details: KickpointDetails) -> Self {
        Self {
            player_name: Some(details.player_name),
            clan_name: Some(details.clan_name),
            ..Self::from(details.kickpoint)
        }
    }
}

impl From<ClanMemberKickpoints> for ClanKickpointsResponse {
    fn from(row: ClanMemberKickpoints) -> Self {
        Self {
            player_tag: row.player_tag.to_string(),
            player_name: row.player_name,
            amount: row.amount,
            at_or_over_ceiling: row.at_or_over_ceiling,
        }
    }
}

// ============================================================================
// Donator Mappers
// ============================================================================

impl From<DonatorRange> for DonatorRangeResponse {
    fn from(range: DonatorRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<DonatorAssignment> for DonatorResponse {
    fn from(assignment: DonatorAssignment) -> Self {
        let donator = assignment.donator;
        Self {
            range: assignment.range.into(),
            tag: donator.tag.to_string(),
            name: donator.name,
            map_position: donator.map_position,
            discord_id: donator.account_id,
        }
    }
}

impl From<DonatorSelection> for DonatorsResponse {
    fn from(selection: DonatorSelection) -> Self {
        match selection {
            DonatorSelection::Assigned {
                assignments,
                unassigned,
            } => Self::Assigned {
                donators: assignments.into_iter().map(Into::into).collect(),
                unassigned: unassigned.into_iter().map(Into::into).collect(),
            },
            DonatorSelection::NoCandidates => Self::NoCandidates {
                message: NO_DONATOR_CANDIDATES.to_string(),
            },
        }
    }
}
