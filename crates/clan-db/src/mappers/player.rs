//! Player entity <-> model mapping

use clan_core::entities::Player;
use clan_core::error::DomainError;

use crate::models::PlayerModel;

use super::stored_tag;

impl TryFrom<PlayerModel> for Player {
    type Error = DomainError;

    fn try_from(model: PlayerModel) -> Result<Self, Self::Error> {
        Ok(Self {
            tag: stored_tag(&model.coc_tag)?,
            name: model.name,
            discord_id: model.discord_id,
        })
    }
}

/// Data for inserting or updating a player
#[derive(Debug)]
pub struct PlayerUpsert<'a> {
    pub coc_tag: &'a str,
    pub name: &'a str,
    pub discord_id: Option<&'a str>,
}

impl<'a> From<&'a Player> for PlayerUpsert<'a> {
    fn from(player: &'a Player) -> Self {
        Self {
            coc_tag: player.tag.as_str(),
            name: &player.name,
            discord_id: player.discord_id.as_deref(),
        }
    }
}
