//! Path parameter extractors
//!
//! Clan and player tags travel without the leading `#` (or with it
//! percent-encoded) and are normalized on extraction.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use clan_core::{DomainError, Tag};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract a typed path parameter, rejecting with `INVALID_PATH_PARAMETER`
#[derive(Debug, Clone)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(IdPath(inner))
    }
}

fn parse_tag(raw: &str) -> Result<Tag, ApiError> {
    Tag::parse(raw).map_err(|e| ApiError::Domain(DomainError::from(e)))
}

/// Path parameters with clan_tag
#[derive(Debug, serde::Deserialize)]
pub struct ClanPath {
    pub clan_tag: String,
}

impl ClanPath {
    pub fn clan_tag(&self) -> Result<Tag, ApiError> {
        parse_tag(&self.clan_tag)
    }
}

/// Path parameters with player_tag
#[derive(Debug, serde::Deserialize)]
pub struct PlayerPath {
    pub player_tag: String,
}

impl PlayerPath {
    pub fn player_tag(&self) -> Result<Tag, ApiError> {
        parse_tag(&self.player_tag)
    }
}

/// Path parameters with clan_tag and player_tag
#[derive(Debug, serde::Deserialize)]
pub struct ClanMemberPath {
    pub clan_tag: String,
    pub player_tag: String,
}

impl ClanMemberPath {
    pub fn clan_tag(&self) -> Result<Tag, ApiError> {
        parse_tag(&self.clan_tag)
    }

    pub fn player_tag(&self) -> Result<Tag, ApiError> {
        parse_tag(&self.player_tag)
    }
}
