use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use clan_common::DiscordConfig;
use clan_core::entities::Player;
use clan_core::traits::{RepoResult, RoleSink};
use clan_core::{DomainError, Tag};
use reqwest::{Client, Method};
use tracing::{debug, instrument};

const API_BASE: &str = "https://discord.com/api/v10";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Grants and revokes guild roles through the chat platform's REST API
#[derive(Debug, Clone)]
pub struct DiscordRoleSink {
    client: Client,
    base_url: String,
    bot_token: String,
    guild_id: String,
    clan_roles: HashMap<Tag, String>,
    ex_member_role_id: Option<String>,
}

impl DiscordRoleSink {
    pub fn new(config: &DiscordConfig) -> Result<Self, reqwest::Error> {
        Self::with_base_url(config, API_BASE)
    }

    pub fn with_base_url(config: &DiscordConfig, base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            guild_id: config.guild_id.clone(),
            clan_roles: config.clan_roles.clone(),
            ex_member_role_id: config.ex_member_role_id.clone(),
        })
    }

    fn role_url(&self, account_id: &str, role_id: &str) -> String {
        format!(
            "{}/guilds/{}/members/{account_id}/roles/{role_id}",
            self.base_url, self.guild_id
        )
    }

    async fn send(&self, method: Method, account_id: &str, role_id: &str) -> RepoResult<()> {
        if !Player::is_valid_discord_id(account_id) {
            return Err(DomainError::InvalidInput(format!(
                "account id {account_id:?} is not numeric"
            )));
        }
        let response = self
            .client
            .request(method, self.role_url(account_id, role_id))
            .header("Authorization", format!("Bot {}", self.bot_token))
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("chat API: {e}")))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DomainError::UpstreamUnavailable(format!(
                "chat API returned {status} for role {role_id}"
            )))
        }
    }

    fn clan_role(&self, clan_tag: &Tag) -> Option<&str> {
        self.clan_roles.get(clan_tag).map(String::as_str)
    }
}

#[async_trait]
impl RoleSink for DiscordRoleSink {
    #[instrument(skip(self))]
    async fn grant_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()> {
        match self.clan_role(clan_tag) {
            Some(role_id) => self.send(Method::PUT, account_id, role_id).await,
            None => {
                debug!("No chat role configured for clan");
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn revoke_clan_role(&self, account_id: &str, clan_tag: &Tag) -> RepoResult<()> {
        match self.clan_role(clan_tag) {
            Some(role_id) => self.send(Method::DELETE, account_id, role_id).await,
            None => {
                debug!("No chat role configured for clan");
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn grant_ex_member_role(&self, account_id: &str) -> RepoResult<()> {
        match &self.ex_member_role_id {
            Some(role_id) => self.send(Method::PUT, account_id, role_id).await,
            None => Ok(()),
        }
    }

    #[instrument(skip(self))]
    async fn revoke_ex_member_role(&self, account_id: &str) -> RepoResult<()> {
        match &self.ex_member_role_id {
            Some(role_id) => self.send(Method::DELETE, account_id, role_id).await,
            None => Ok(()),
        }
    }
}
