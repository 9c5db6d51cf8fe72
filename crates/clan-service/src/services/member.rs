//! Member service
//!
//! Handles clan membership: adding, editing, removing and transferring
//! members, plus the kickpoint lock and the in-game roster comparison.

use std::collections::HashSet;

use clan_core::entities::{ClanMember, MemberProfile, Player};
use clan_core::{AuthRole, DomainError, MemberAction, Outcome, Tag};
use tracing::{info, instrument};

use crate::dto::{
    AddMemberRequest, GameMemberResponse, KickpointLockResponse, MemberResponse,
    MemberStatusResponse, MembershipResponse, PlayerResponse, TransferMemberRequest,
    UpdateMemberRequest,
};

use super::authorization::AuthorizationService;
use super::clan::find_clan;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::role_sync::RoleSync;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members of a clan, highest role first
    #[instrument(skip(self))]
    pub async fn list_members(&self, clan_tag: &Tag) -> ServiceResult<Vec<MemberResponse>> {
        find_clan(self.ctx, clan_tag).await?;

        let members = self.ctx.member_repo().list_by_clan(clan_tag).await?;
        Ok(members.into_iter().map(MemberResponse::from).collect())
    }

    /// Get one member of a clan
    #[instrument(skip(self))]
    pub async fn get_member(
        &self,
        clan_tag: &Tag,
        player_tag: &Tag,
    ) -> ServiceResult<MemberResponse> {
        Ok(self.find_profile(player_tag, clan_tag).await?.into())
    }

    /// The player's current membership
    #[instrument(skip(self))]
    pub async fn current_membership(&self, player_tag: &Tag) -> ServiceResult<MembershipResponse> {
        let member = self
            .ctx
            .member_repo()
            .find_current(player_tag)
            .await?
            .ok_or_else(|| DomainError::NoActiveMembership(player_tag.clone()))?;

        Ok(member.into())
    }

    /// Add a player to a clan.
    ///
    /// Fails with `AlreadyMember` if the player belongs to any clan.
    #[instrument(skip(self, request))]
    pub async fn add_member(
        &self,
        clan_tag: &Tag,
        actor_id: &str,
        request: AddMemberRequest,
    ) -> ServiceResult<Outcome<MemberResponse>> {
        let player_tag = Tag::parse(&request.player_tag)?;

        AuthorizationService::new(self.ctx)
            .require_member_action(actor_id, clan_tag, MemberAction::Add, Some(request.role))
            .await?;

        let player = self.find_player(&player_tag).await?;
        let member = ClanMember::new(
            player_tag.clone(),
            clan_tag.clone(),
            request.role,
            actor_id,
            self.ctx.now(),
        );
        self.ctx.member_repo().create(&member).await?;

        info!(player_tag = %player_tag, clan_tag = %clan_tag, role = %request.role, "Member added");

        // Committed; the response is built without reading the row back
        let profile = MemberProfile { member, player };
        let mut outcome = Outcome::new(());
        RoleSync::new(self.ctx)
            .joined(profile.player.discord_id.as_deref(), clan_tag, &mut outcome)
            .await;

        Ok(outcome.map(|()| profile.into()))
    }

    /// Change a member's role
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        clan_tag: &Tag,
        player_tag: &Tag,
        actor_id: &str,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let mut profile = self.find_profile(player_tag, clan_tag).await?;

        if profile.member.role == request.role {
            return Err(DomainError::RoleUnchanged(request.role).into());
        }

        AuthorizationService::new(self.ctx)
            .require_member_action(actor_id, clan_tag, MemberAction::Edit, Some(request.role))
            .await?;

        self.ctx
            .member_repo()
            .update_role(player_tag, clan_tag, request.role)
            .await?;

        info!(
            player_tag = %player_tag,
            clan_tag = %clan_tag,
            from = %profile.member.role,
            to = %request.role,
            "Member role changed"
        );

        profile.member.role = request.role;
        Ok(profile.into())
    }

    /// Remove a member. Kickpoints are kept.
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        clan_tag: &Tag,
        player_tag: &Tag,
        actor_id: &str,
    ) -> ServiceResult<Outcome<()>> {
        let profile = self.find_profile(player_tag, clan_tag).await?;

        AuthorizationService::new(self.ctx)
            .require_member_action(
                actor_id,
                clan_tag,
                MemberAction::Remove,
                Some(profile.member.role),
            )
            .await?;

        self.ctx.member_repo().delete(player_tag, clan_tag).await?;

        info!(player_tag = %player_tag, clan_tag = %clan_tag, "Member removed");

        let mut outcome = Outcome::new(());
        RoleSync::new(self.ctx)
            .left(profile.player.discord_id.as_deref(), clan_tag, &mut outcome)
            .await;

        Ok(outcome)
    }

    /// Move a player from one clan to another in a single atomic step
    #[instrument(skip(self, request))]
    pub async fn transfer_member(
        &self,
        actor_id: &str,
        request: TransferMemberRequest,
    ) -> ServiceResult<Outcome<MemberResponse>> {
        let player_tag = Tag::parse(&request.player_tag)?;
        let from = Tag::parse(&request.from_clan_tag)?;
        let to = Tag::parse(&request.to_clan_tag)?;

        if from == to {
            return Err(DomainError::InvalidInput(
                "source and destination clan must differ".to_string(),
            )
            .into());
        }

        AuthorizationService::new(self.ctx)
            .require_transfer(actor_id, &from, &to)
            .await?;

        let player = self.find_player(&player_tag).await?;
        let member = ClanMember::new(
            player_tag.clone(),
            to.clone(),
            request.role,
            actor_id,
            self.ctx.now(),
        );
        self.ctx.member_repo().transfer(&from, &member).await?;

        info!(player_tag = %player_tag, from = %from, to = %to, role = %request.role, "Member transferred");

        let profile = MemberProfile { member, player };
        let mut outcome = Outcome::new(());
        RoleSync::new(self.ctx)
            .moved(profile.player.discord_id.as_deref(), &from, &to, &mut outcome)
            .await;

        Ok(outcome.map(|()| profile.into()))
    }

    /// Lock or unlock kickpoints for a member
    #[instrument(skip(self))]
    pub async fn set_kickpoint_lock(
        &self,
        clan_tag: &Tag,
        player_tag: &Tag,
        actor_id: &str,
        locked: bool,
    ) -> ServiceResult<KickpointLockResponse> {
        AuthorizationService::new(self.ctx)
            .require(actor_id, clan_tag, AuthRole::CoLeader)
            .await?;

        self.find_profile(player_tag, clan_tag).await?;

        let repo = self.ctx.member_state_repo();
        repo.set_kickpoint_lock(player_tag, clan_tag, locked).await?;

        info!(player_tag = %player_tag, clan_tag = %clan_tag, locked, "Kickpoint lock changed");

        Ok(repo.find_or_default(player_tag, clan_tag).await?.into())
    }

    /// Compare the stored roster with the live in-game roster
    #[instrument(skip(self))]
    pub async fn member_status(&self, clan_tag: &Tag) -> ServiceResult<MemberStatusResponse> {
        find_clan(self.ctx, clan_tag).await?;

        let stored = self.ctx.member_repo().list_by_clan(clan_tag).await?;
        let snapshot = self.ctx.oracle().get_clan(clan_tag).await?;

        let in_game: HashSet<&Tag> = snapshot.members.iter().map(|m| &m.tag).collect();
        let stored_tags: HashSet<&Tag> = stored.iter().map(|p| &p.member.player_tag).collect();

        let missing_in_game = stored
            .iter()
            .filter(|p| !in_game.contains(&p.member.player_tag))
            .map(|p| PlayerResponse::from(&p.player))
            .collect();

        let not_registered = snapshot
            .members
            .iter()
            .filter(|m| !stored_tags.contains(&m.tag))
            .cloned()
            .map(GameMemberResponse::from)
            .collect();

        Ok(MemberStatusResponse {
            clan_tag: clan_tag.to_string(),
            missing_in_game,
            not_registered,
        })
    }

    async fn find_player(&self, player_tag: &Tag) -> ServiceResult<Player> {
        self.ctx
            .player_repo()
            .find_by_tag(player_tag)
            .await?
            .ok_or_else(|| DomainError::PlayerNotFound(player_tag.clone()).into())
    }

    async fn find_profile(&self, player_tag: &Tag, clan_tag: &Tag) -> ServiceResult<MemberProfile> {
        self.ctx
            .member_repo()
            .find(player_tag, clan_tag)
            .await?
            .ok_or_else(|| member_not_found(player_tag, clan_tag))
    }
}

pub(crate) fn member_not_found(player_tag: &Tag, clan_tag: &Tag) -> ServiceError {
    DomainError::MemberNotFound {
        player_tag: player_tag.clone(),
        clan_tag: clan_tag.clone(),
    }
    .into()
}
