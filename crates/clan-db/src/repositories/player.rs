//! PostgreSQL implementation of PlayerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clan_core::entities::Player;
use clan_core::traits::{PlayerRepository, RepoResult};
use clan_core::value_objects::Tag;

use crate::mappers::PlayerUpsert;
use crate::models::PlayerModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PlayerRepository
#[derive(Clone)]
pub struct PgPlayerRepository {
    pool: PgPool,
}

impl PgPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    #[instrument(skip(self))]
    async fn find_by_tag(&self, tag: &Tag) -> RepoResult<Option<Player>> {
        sqlx::query_as::<_, PlayerModel>(
            r#"
            SELECT coc_tag, name, discord_id
            FROM players
            WHERE coc_tag = $1
            "#,
        )
        .bind(tag.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Player::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn upsert(&self, player: &Player) -> RepoResult<()> {
        let row = PlayerUpsert::from(player);
        sqlx::query(
            r#"
            INSERT INTO players (coc_tag, name, discord_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (coc_tag)
            DO UPDATE SET name = EXCLUDED.name, discord_id = EXCLUDED.discord_id
            "#,
        )
        .bind(row.coc_tag)
        .bind(row.name)
        .bind(row.discord_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
