//! Authorization service
//!
//! Resolves what a caller may act as and enforces the role requirements
//! of every mutation.

use clan_core::{required_role, AuthRole, CallerRoles, ClanRole, MemberAction, Tag};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct AuthorizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Roles of an account: the configured admin flag plus the clan role of
    /// every membership held by its linked players
    #[instrument(skip(self))]
    pub async fn caller_roles(&self, account_id: &str) -> ServiceResult<CallerRoles> {
        let memberships = self.ctx.member_repo().list_by_discord_id(account_id).await?;

        let roles = memberships.into_iter().fold(
            CallerRoles::new(account_id).with_admin(self.ctx.admins().is_admin(account_id)),
            |roles, m| roles.with_clan_role(m.clan_tag, m.role),
        );

        debug!(admin = roles.admin, clans = roles.clan_roles.len(), "Resolved caller roles");
        Ok(roles)
    }

    /// Fail with `Unauthorized` unless the caller holds `required` in `clan_tag`
    #[instrument(skip(self))]
    pub async fn require(
        &self,
        account_id: &str,
        clan_tag: &Tag,
        required: AuthRole,
    ) -> ServiceResult<CallerRoles> {
        let roles = self.caller_roles(account_id).await?;
        check(&roles, clan_tag, required)?;
        Ok(roles)
    }

    /// Apply the membership role table to `action`
    pub async fn require_member_action(
        &self,
        account_id: &str,
        clan_tag: &Tag,
        action: MemberAction,
        target: Option<ClanRole>,
    ) -> ServiceResult<CallerRoles> {
        self.require(account_id, clan_tag, required_role(action, target))
            .await
    }

    /// A transfer needs `Admin` in both clans, checked source first
    #[instrument(skip(self))]
    pub async fn require_transfer(
        &self,
        account_id: &str,
        from: &Tag,
        to: &Tag,
    ) -> ServiceResult<CallerRoles> {
        let roles = self.caller_roles(account_id).await?;
        let required = required_role(MemberAction::Transfer, None);
        check(&roles, from, required)?;
        check(&roles, to, required)?;
        Ok(roles)
    }

    /// Registry writes are not tied to a clan and need the global admin flag
    pub fn require_admin(&self, account_id: &str, context: &Tag) -> ServiceResult<()> {
        if self.ctx.admins().is_admin(account_id) {
            Ok(())
        } else {
            Err(ServiceError::unauthorized(context, AuthRole::Admin))
        }
    }
}

fn check(roles: &CallerRoles, clan_tag: &Tag, required: AuthRole) -> ServiceResult<()> {
    if roles.satisfies(clan_tag, required) {
        Ok(())
    } else {
        debug!(clan_tag = %clan_tag, %required, "Caller lacks required role");
        Err(ServiceError::unauthorized(clan_tag, required))
    }
}
