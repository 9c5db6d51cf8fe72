//! PostgreSQL implementation of KickpointRepository
//!
//! Every time-dependent query binds the caller's `now`; the active window is
//! `date <= now < expires_at`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use clan_core::entities::{
    ClanMemberKickpoints, ClanSettings, Kickpoint, KickpointChanges, KickpointDetails,
    NewKickpoint,
};
use clan_core::error::DomainError;
use clan_core::traits::{KickpointRepository, RepoResult};
use clan_core::value_objects::Tag;

use crate::mappers::{clan_kickpoint_sums, KickpointInsert};
use crate::models::{ClanKickpointSumModel, KickpointDetailsModel, KickpointModel};

use super::error::{map_db_error, map_player_clan_fk};

/// PostgreSQL implementation of KickpointRepository
#[derive(Clone)]
pub struct PgKickpointRepository {
    pool: PgPool,
}

impl PgKickpointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_entities(models: Vec<KickpointModel>) -> RepoResult<Vec<Kickpoint>> {
    models.into_iter().map(Kickpoint::try_from).collect()
}

#[async_trait]
impl KickpointRepository for PgKickpointRepository {
    #[instrument(skip(self))]
    async fn create(
        &self,
        kickpoint: &NewKickpoint,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RepoResult<Kickpoint> {
        let row = KickpointInsert::new(kickpoint, expires_at);
        let model = sqlx::query_as::<_, KickpointModel>(
            r#"
            INSERT INTO kickpoints (player_tag, clan_tag, date, amount, description,
                                    created_by_discord_id, created_at, updated_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
            RETURNING id, player_tag, clan_tag, date, amount, description,
                      created_by_discord_id, updated_by_discord_id, created_at, updated_at, expires_at
            "#,
        )
        .bind(row.player_tag)
        .bind(row.clan_tag)
        .bind(row.date)
        .bind(row.amount)
        .bind(row.description)
        .bind(row.created_by_discord_id)
        .bind(now)
        .bind(row.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_player_clan_fk(e, &kickpoint.player_tag, &kickpoint.clan_tag))?;

        Kickpoint::try_from(model)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<KickpointDetails>> {
        sqlx::query_as::<_, KickpointDetailsModel>(
            r#"
            SELECT k.id, k.player_tag, k.clan_tag, k.date, k.amount, k.description,
                   k.created_by_discord_id, k.updated_by_discord_id, k.created_at,
                   k.updated_at, k.expires_at,
                   p.name AS player_name, c.name AS clan_name
            FROM kickpoints k
            JOIN players p ON p.coc_tag = k.player_tag
            JOIN clans c ON c.tag = k.clan_tag
            WHERE k.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(KickpointDetails::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        id: i64,
        changes: &KickpointChanges,
        expires_at: DateTime<Utc>,
        updated_by: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE kickpoints
            SET amount = COALESCE($2, amount),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                expires_at = $5,
                updated_by_discord_id = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.amount)
        .bind(changes.description.as_deref())
        .bind(changes.date)
        .bind(expires_at)
        .bind(updated_by)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::KickpointNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM kickpoints WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::KickpointNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_active_by_player(
        &self,
        player_tag: &Tag,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Kickpoint>> {
        let models = sqlx::query_as::<_, KickpointModel>(
            r#"
            SELECT id, player_tag, clan_tag, date, amount, description,
                   created_by_discord_id, updated_by_discord_id, created_at, updated_at, expires_at
            FROM kickpoints
            WHERE player_tag = $1 AND date <= $2 AND expires_at > $2
            ORDER BY created_at, id
            "#,
        )
        .bind(player_tag.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(models)
    }

    #[instrument(skip(self))]
    async fn active_sum_by_player(&self, player_tag: &Tag, now: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT
            FROM kickpoints
            WHERE player_tag = $1 AND date <= $2 AND expires_at > $2
            "#,
        )
        .bind(player_tag.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn active_sums_by_clan(
        &self,
        settings: &ClanSettings,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<ClanMemberKickpoints>> {
        let models = sqlx::query_as::<_, ClanKickpointSumModel>(
            r#"
            SELECT k.player_tag, p.name AS player_name, SUM(k.amount)::BIGINT AS amount
            FROM kickpoints k
            JOIN players p ON p.coc_tag = k.player_tag
            JOIN clan_members m ON m.player_tag = k.player_tag
            WHERE m.clan_tag = $1 AND k.date <= $2 AND k.expires_at > $2
            GROUP BY k.player_tag, p.name
            ORDER BY amount DESC, p.name
            "#,
        )
        .bind(settings.clan_tag.as_str())
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        clan_kickpoint_sums(models, settings)
    }

    #[instrument(skip(self))]
    async fn lifetime_sum_by_player(&self, player_tag: &Tag) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::BIGINT
            FROM kickpoints
            WHERE player_tag = $1
            "#,
        )
        .bind(player_tag.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_future_by_player(
        &self,
        player_tag: &Tag,
        now: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Kickpoint>> {
        let models = sqlx::query_as::<_, KickpointModel>(
            r#"
            SELECT id, player_tag, clan_tag, date, amount, description,
                   created_by_discord_id, updated_by_discord_id, created_at, updated_at, expires_at
            FROM kickpoints
            WHERE player_tag = $1 AND date > $2
            ORDER BY created_at, id
            LIMIT $3
            "#,
        )
        .bind(player_tag.as_str())
        .bind(now)
        .bind(limit.clamp(1, Kickpoint::FUTURE_LIMIT))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(models)
    }
}
