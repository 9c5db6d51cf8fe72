//! PostgreSQL implementation of ClanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clan_core::entities::Clan;
use clan_core::error::DomainError;
use clan_core::traits::{ClanRepository, RepoResult};
use clan_core::value_objects::Tag;

use crate::mappers::ClanInsert;
use crate::models::ClanModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ClanRepository
#[derive(Clone)]
pub struct PgClanRepository {
    pool: PgPool,
}

impl PgClanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClanRepository for PgClanRepository {
    #[instrument(skip(self))]
    async fn find_by_tag(&self, tag: &Tag) -> RepoResult<Option<Clan>> {
        sqlx::query_as::<_, ClanModel>(
            r#"
            SELECT tag, name, sort_index
            FROM clans
            WHERE tag = $1
            "#,
        )
        .bind(tag.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Clan::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Clan>> {
        sqlx::query_as::<_, ClanModel>(
            r#"
            SELECT tag, name, sort_index
            FROM clans
            ORDER BY sort_index, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(Clan::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn create(&self, clan: &Clan) -> RepoResult<()> {
        let row = ClanInsert::from(clan);
        sqlx::query(
            r#"
            INSERT INTO clans (tag, name, sort_index)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(row.tag)
        .bind(row.name)
        .bind(row.sort_index)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ClanAlreadyExists(clan.tag.clone())))?;

        Ok(())
    }
}
