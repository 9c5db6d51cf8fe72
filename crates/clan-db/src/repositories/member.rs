//! PostgreSQL implementation of MemberRepository
//!
//! `clan_members` carries a unique constraint on `player_tag`, so a player
//! can be stored in at most one clan. Inserts never check first: the
//! constraint violation is what reports an existing membership.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{info, instrument};

use clan_core::entities::{ClanMember, MemberProfile};
use clan_core::traits::{MemberRepository, RepoResult};
use clan_core::value_objects::{ClanRole, Tag};

use crate::mappers::MemberInsert;
use crate::models::{ClanMemberModel, MemberProfileModel};

use super::error::{map_db_error, map_member_insert_error, member_not_found};

const PROFILE_SELECT: &str = r#"
    SELECT m.player_tag, m.clan_tag, m.clan_role, m.added_by_discord_id, m.created_at,
           p.name AS player_name, p.discord_id
    FROM clan_members m
    JOIN players p ON p.coc_tag = m.player_tag
"#;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert<'e>(executor: impl PgExecutor<'e>, member: &ClanMember) -> RepoResult<()> {
        let row = MemberInsert::from(member);
        sqlx::query(
            r#"
            INSERT INTO clan_members (player_tag, clan_tag, clan_role, added_by_discord_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.player_tag)
        .bind(row.clan_tag)
        .bind(row.clan_role)
        .bind(row.added_by_discord_id)
        .bind(row.created_at)
        .execute(executor)
        .await
        .map_err(|e| map_member_insert_error(e, &member.player_tag, &member.clan_tag))?;

        Ok(())
    }

    async fn remove<'e>(
        executor: impl PgExecutor<'e>,
        player_tag: &Tag,
        clan_tag: &Tag,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM clan_members
            WHERE player_tag = $1 AND clan_tag = $2
            "#,
        )
        .bind(player_tag.as_str())
        .bind(clan_tag.as_str())
        .execute(executor)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(player_tag, clan_tag));
        }

        Ok(())
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn create(&self, member: &ClanMember) -> RepoResult<()> {
        Self::insert(&self.pool, member).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<()> {
        Self::remove(&self.pool, player_tag, clan_tag).await
    }

    #[instrument(skip(self))]
    async fn find(&self, player_tag: &Tag, clan_tag: &Tag) -> RepoResult<Option<MemberProfile>> {
        let query = format!("{PROFILE_SELECT} WHERE m.player_tag = $1 AND m.clan_tag = $2");
        sqlx::query_as::<_, MemberProfileModel>(&query)
            .bind(player_tag.as_str())
            .bind(clan_tag.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(MemberProfile::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_current(&self, player_tag: &Tag) -> RepoResult<Option<ClanMember>> {
        sqlx::query_as::<_, ClanMemberModel>(
            r#"
            SELECT player_tag, clan_tag, clan_role, added_by_discord_id, created_at
            FROM clan_members
            WHERE player_tag = $1
            "#,
        )
        .bind(player_tag.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(ClanMember::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_clan(&self, clan_tag: &Tag) -> RepoResult<Vec<MemberProfile>> {
        let query = format!(
            r#"{PROFILE_SELECT}
            WHERE m.clan_tag = $1
            ORDER BY CASE m.clan_role
                         WHEN 'leader' THEN 0
                         WHEN 'co_leader' THEN 1
                         WHEN 'elder' THEN 2
                         ELSE 3
                     END,
                     p.name"#
        );
        sqlx::query_as::<_, MemberProfileModel>(&query)
            .bind(clan_tag.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?
            .into_iter()
            .map(MemberProfile::try_from)
            .collect()
    }

    #[instrument(skip(self))]
    async fn list_by_discord_id(&self, discord_id: &str) -> RepoResult<Vec<ClanMember>> {
        sqlx::query_as::<_, ClanMemberModel>(
            r#"
            SELECT m.player_tag, m.clan_tag, m.clan_role, m.added_by_discord_id, m.created_at
            FROM clan_members m
            JOIN players p ON p.coc_tag = m.player_tag
            WHERE p.discord_id = $1
            "#,
        )
        .bind(discord_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(ClanMember::try_from)
        .collect()
    }

    #[instrument(skip(self))]
    async fn update_role(&self, player_tag: &Tag, clan_tag: &Tag, role: ClanRole) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE clan_members
            SET clan_role = $3
            WHERE player_tag = $1 AND clan_tag = $2
            "#,
        )
        .bind(player_tag.as_str())
        .bind(clan_tag.as_str())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(player_tag, clan_tag));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn transfer(&self, from: &Tag, member: &ClanMember) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // An early return drops `tx`, which rolls the delete back
        Self::remove(&mut *tx, &member.player_tag, from).await?;
        Self::insert(&mut *tx, member).await?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            player_tag = %member.player_tag,
            from = %from,
            to = %member.clan_tag,
            "Membership transferred"
        );
        Ok(())
    }
}
