use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clan_common::ClashApiConfig;
use clan_core::entities::{ClanSnapshot, ClanSnapshotMember, WarParticipant, WarPreference};
use clan_core::traits::{GameDataOracle, RepoResult};
use clan_core::{ClanRole, DomainError, Tag};
use futures::future::try_join_all;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{instrument, warn};

/// Game data API client
///
/// Reads clans, current wars and player profiles with a bearer token.
/// Every failure is reported as `UpstreamUnavailable` and never retried.
/// Requests wait on a shared limiter, so a war roster lookup fanning out
/// to every participant stays inside the API's request budget.
#[derive(Clone)]
pub struct ClashApiClient {
    client: Client,
    base_url: String,
    token: String,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl fmt::Debug for ClashApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClashApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClanBody {
    tag: String,
    name: String,
    #[serde(default)]
    member_list: Vec<ClanMemberBody>,
}

#[derive(Debug, Deserialize)]
struct ClanMemberBody {
    tag: String,
    name: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct WarBody {
    #[serde(default)]
    clan: Option<WarClanBody>,
}

#[derive(Debug, Deserialize)]
struct WarClanBody {
    #[serde(default)]
    members: Vec<WarMemberBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WarMemberBody {
    tag: String,
    name: String,
    map_position: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerBody {
    #[serde(default)]
    war_preference: Option<WarPreference>,
}

impl ClashApiClient {
    pub fn new(config: &ClashApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
        })
    }

    /// GET a JSON document; `None` on 404
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RepoResult<Option<T>> {
        self.limiter.until_ready().await;

        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| upstream(&format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%status, path, "Game data API returned an error");
            return Err(upstream(&format!("{path} returned {status}")));
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| upstream(&format!("invalid response from {path}: {e}")))
    }

    async fn war_preference(&self, player_tag: &Tag) -> RepoResult<WarPreference> {
        let path = format!("/players/{}", player_tag.url_encoded());
        let player: Option<PlayerBody> = self.get_json(&path).await?;

        Ok(player
            .and_then(|p| p.war_preference)
            .unwrap_or(WarPreference::Out))
    }
}

#[async_trait]
impl GameDataOracle for ClashApiClient {
    #[instrument(skip(self))]
    async fn get_clan(&self, clan_tag: &Tag) -> RepoResult<ClanSnapshot> {
        let path = format!("/clans/{}", clan_tag.url_encoded());
        let body: ClanBody = self
            .get_json(&path)
            .await?
            .ok_or_else(|| DomainError::ClanNotFound(clan_tag.clone()))?;

        let members = body
            .member_list
            .into_iter()
            .map(|m| -> RepoResult<ClanSnapshotMember> {
                Ok(ClanSnapshotMember {
                    tag: response_tag(&m.tag)?,
                    name: m.name,
                    role: m
                        .role
                        .parse::<ClanRole>()
                        .map_err(|e| upstream(&e.to_string()))?,
                })
            })
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(ClanSnapshot {
            tag: response_tag(&body.tag)?,
            name: body.name,
            members,
        })
    }

    #[instrument(skip(self))]
    async fn get_war_roster(&self, clan_tag: &Tag) -> RepoResult<Vec<WarParticipant>> {
        let path = format!("/clans/{}/currentwar", clan_tag.url_encoded());
        let war: WarBody = self
            .get_json(&path)
            .await?
            .ok_or_else(|| DomainError::ClanNotFound(clan_tag.clone()))?;

        let members = war.clan.map(|c| c.members).unwrap_or_default();

        let roster = try_join_all(members.into_iter().map(|m| async move {
            let tag = response_tag(&m.tag)?;
            let war_preference = self.war_preference(&tag).await?;
            Ok::<_, DomainError>(WarParticipant {
                tag,
                name: m.name,
                war_preference,
                map_position: m.map_position,
            })
        }))
        .await?;

        Ok(roster)
    }
}

fn upstream(msg: &str) -> DomainError {
    DomainError::UpstreamUnavailable(format!("game data API: {msg}"))
}

fn response_tag(raw: &str) -> RepoResult<Tag> {
    Tag::parse(raw).map_err(|e| upstream(&format!("bad tag {raw:?}: {e}")))
}
