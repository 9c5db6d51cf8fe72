//! Best-effort chat role synchronization after committed membership changes

use clan_core::traits::RepoResult;
use clan_core::{Outcome, SideEffect, SideEffectWarning, Tag};
use tracing::warn;

use super::context::ServiceContext;

pub(crate) struct RoleSync<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleSync<'a> {
    pub(crate) fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Member joined `clan_tag`: grant its role, drop the ex-member role
    pub(crate) async fn joined<T>(
        &self,
        account_id: Option<&str>,
        clan_tag: &Tag,
        outcome: &mut Outcome<T>,
    ) {
        let Some(account_id) = account_id else {
            return;
        };
        let sink = self.ctx.role_sink();

        let result = sink.grant_clan_role(account_id, clan_tag).await;
        record(outcome, SideEffect::GrantClanRole, account_id, Some(clan_tag), result);

        let result = sink.revoke_ex_member_role(account_id).await;
        record(outcome, SideEffect::RevokeExMemberRole, account_id, None, result);
    }

    /// Member left `clan_tag`: revoke its role, grant the ex-member role
    pub(crate) async fn left<T>(
        &self,
        account_id: Option<&str>,
        clan_tag: &Tag,
        outcome: &mut Outcome<T>,
    ) {
        let Some(account_id) = account_id else {
            return;
        };
        let sink = self.ctx.role_sink();

        let result = sink.revoke_clan_role(account_id, clan_tag).await;
        record(outcome, SideEffect::RevokeClanRole, account_id, Some(clan_tag), result);

        let result = sink.grant_ex_member_role(account_id).await;
        record(outcome, SideEffect::GrantExMemberRole, account_id, None, result);
    }

    /// Member moved between clans: swap the clan roles
    pub(crate) async fn moved<T>(
        &self,
        account_id: Option<&str>,
        from: &Tag,
        to: &Tag,
        outcome: &mut Outcome<T>,
    ) {
        let Some(account_id) = account_id else {
            return;
        };
        let sink = self.ctx.role_sink();

        let result = sink.revoke_clan_role(account_id, from).await;
        record(outcome, SideEffect::RevokeClanRole, account_id, Some(from), result);

        let result = sink.grant_clan_role(account_id, to).await;
        record(outcome, SideEffect::GrantClanRole, account_id, Some(to), result);
    }
}

fn record<T>(
    outcome: &mut Outcome<T>,
    action: SideEffect,
    account_id: &str,
    clan_tag: Option<&Tag>,
    result: RepoResult<()>,
) {
    if let Err(e) = result {
        warn!(?action, account_id, error = %e, "Role sync failed");
        outcome.warn(SideEffectWarning {
            action,
            account_id: account_id.to_string(),
            clan_tag: clan_tag.cloned(),
            reason: e.to_string(),
        });
    }
}
