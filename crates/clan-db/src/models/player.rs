//! Player database model

use sqlx::FromRow;

/// Database model for the players table
#[derive(Debug, Clone, FromRow)]
pub struct PlayerModel {
    pub coc_tag: String,
    pub name: String,
    pub discord_id: Option<String>,
}
