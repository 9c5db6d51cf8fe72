//! Membership entity <-> model mapping

use chrono::{DateTime, Utc};
use clan_core::entities::{ClanMember, MemberProfile, MemberState, Player};
use clan_core::error::DomainError;
use clan_core::value_objects::ClanRole;

use crate::models::{ClanMemberModel, MemberProfileModel, MemberStateModel};
use crate::repositories::error::corrupt_role;

use super::stored_tag;

impl TryFrom<ClanMemberModel> for ClanMember {
    type Error = DomainError;

    fn try_from(model: ClanMemberModel) -> Result<Self, Self::Error> {
        let role = model
            .clan_role
            .parse::<ClanRole>()
            .map_err(|_| corrupt_role(&model.clan_role))?;
        Ok(Self {
            player_tag: stored_tag(&model.player_tag)?,
            clan_tag: stored_tag(&model.clan_tag)?,
            role,
            added_by: model.added_by_discord_id,
            joined_at: model.created_at,
        })
    }
}

impl TryFrom<MemberProfileModel> for MemberProfile {
    type Error = DomainError;

    fn try_from(model: MemberProfileModel) -> Result<Self, Self::Error> {
        let member = ClanMember::try_from(model.member)?;
        let player = Player {
            tag: member.player_tag.clone(),
            name: model.player_name,
            discord_id: model.discord_id,
        };
        Ok(Self { member, player })
    }
}

impl TryFrom<MemberStateModel> for MemberState {
    type Error = DomainError;

    fn try_from(model: MemberStateModel) -> Result<Self, Self::Error> {
        Ok(Self {
            player_tag: stored_tag(&model.player_tag)?,
            clan_tag: stored_tag(&model.clan_tag)?,
            kickpoint_lock: model.kickpoint_lock,
        })
    }
}

/// Data for inserting a membership
#[derive(Debug)]
pub struct MemberInsert<'a> {
    pub player_tag: &'a str,
    pub clan_tag: &'a str,
    pub clan_role: &'static str,
    pub added_by_discord_id: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a ClanMember> for MemberInsert<'a> {
    fn from(member: &'a ClanMember) -> Self {
        Self {
            player_tag: member.player_tag.as_str(),
            clan_tag: member.clan_tag.as_str(),
            clan_role: member.role.as_str(),
            added_by_discord_id: &member.added_by,
            created_at: member.joined_at,
        }
    }
}
