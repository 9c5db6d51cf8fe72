//! PostgreSQL implementation of ClanSettingsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clan_core::entities::ClanSettings;
use clan_core::error::DomainError;
use clan_core::traits::{ClanSettingsRepository, RepoResult};
use clan_core::value_objects::Tag;

use crate::mappers::ClanSettingsUpsert;
use crate::models::ClanSettingsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ClanSettingsRepository
#[derive(Clone)]
pub struct PgClanSettingsRepository {
    pool: PgPool,
}

impl PgClanSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClanSettingsRepository for PgClanSettingsRepository {
    #[instrument(skip(self))]
    async fn find_or_default(&self, clan_tag: &Tag) -> RepoResult<ClanSettings> {
        let model = sqlx::query_as::<_, ClanSettingsModel>(
            r#"
            SELECT clan_tag, max_kickpoints, min_season_wins, kickpoints_expire_after_days,
                   updated_at, updated_by_discord_id
            FROM clan_settings
            WHERE clan_tag = $1
            "#,
        )
        .bind(clan_tag.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => ClanSettings::try_from(model),
            None => Ok(ClanSettings::defaults(clan_tag.clone())),
        }
    }

    #[instrument(skip(self))]
    async fn save(&self, settings: &ClanSettings) -> RepoResult<()> {
        let row = ClanSettingsUpsert::from(settings);
        sqlx::query(
            r#"
            INSERT INTO clan_settings (clan_tag, max_kickpoints, min_season_wins,
                                       kickpoints_expire_after_days, updated_at, updated_by_discord_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (clan_tag) DO UPDATE SET
                max_kickpoints = EXCLUDED.max_kickpoints,
                min_season_wins = EXCLUDED.min_season_wins,
                kickpoints_expire_after_days = EXCLUDED.kickpoints_expire_after_days,
                updated_at = EXCLUDED.updated_at,
                updated_by_discord_id = EXCLUDED.updated_by_discord_id
            "#,
        )
        .bind(row.clan_tag)
        .bind(row.max_kickpoints)
        .bind(row.min_season_wins)
        .bind(row.kickpoints_expire_after_days)
        .bind(row.updated_at)
        .bind(row.updated_by_discord_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => {
                DomainError::ClanNotFound(settings.clan_tag.clone())
            }
            _ => map_db_error(e),
        })?;

        Ok(())
    }
}
