//! PostgreSQL implementation of MemberStateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clan_core::entities::MemberState;
use clan_core::traits::{MemberStateRepository, RepoResult};
use clan_core::value_objects::Tag;

use crate::models::MemberStateModel;

use super::error::{map_db_error, map_player_clan_fk};

/// PostgreSQL implementation of MemberStateRepository
#[derive(Clone)]
pub struct PgMemberStateRepository {
    pool: PgPool,
}

impl PgMemberStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStateRepository for PgMemberStateRepository {
    #[instrument(skip(self))]
    async fn find_or_default(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<MemberState> {
        let model = sqlx::query_as::<_, MemberStateModel>(
            r#"
            SELECT player_tag, clan_tag, kickpoint_lock
            FROM member_states
            WHERE player_tag = $1 AND clan_tag = $2
            "#,
        )
        .bind(player_tag.as_str())
        .bind(clan_tag.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => MemberState::try_from(model),
            None => Ok(MemberState::unlocked(player_tag.clone(), clan_tag.clone())),
        }
    }

    #[instrument(skip(self))]
    async fn set_kickpoint_lock(
        &self,
        player_tag: &Tag,
        clan_tag: &Tag,
        locked: bool,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO member_states (player_tag, clan_tag, kickpoint_lock)
            VALUES ($1, $2, $3)
            ON CONFLICT (player_tag, clan_tag)
            DO UPDATE SET kickpoint_lock = EXCLUDED.kickpoint_lock
            "#,
        )
        .bind(player_tag.as_str())
        .bind(clan_tag.as_str())
        .bind(locked)
        .execute(&self.pool)
        .await
        .map_err(|e| map_player_clan_fk(e, player_tag, clan_tag))?;

        Ok(())
    }
}
