use async_trait::async_trait;
use clan_core::traits::{RepoResult, RoleSink};
use clan_core::Tag;
use tracing::debug;

/// Role sink used when no chat platform is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRoleSink;

#[async_trait]
impl RoleSink for NoopRoleSink {
    async fn grant_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()> {
        debug!(account_id, clan_tag = %clan_tag, "Role sync disabled, skipping grant");
        Ok(())
    }

    async fn revoke_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()> {
        debug!(account_id, clan_tag = %clan_tag, "Role sync disabled, skipping revoke");
        Ok(())
    }

    async fn grant_ex_member_role(&self, _account_id: &str) -> RepoResult<()> {
        Ok(())
    }

    async fn revoke_ex_member_role(&self, _account_id: &str) -> RepoResult<()> {
        Ok(())
    }
}
