//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{DomainError, Member, MemberRepository, Page, Paged, RepoResult, Snowflake};

use crate::models::MemberModel;

use super::error::{map_db_error, map_member_insert_error, to_total};

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, community_id, user_id, role, created_at
            FROM members
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_community(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, community_id, user_id, role, created_at
            FROM members
            WHERE user_id = $1 AND community_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_community_role(
        &self,
        user_id: Snowflake,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, community_id, user_id, role, created_at
            FROM members
            WHERE user_id = $1 AND community_id = $2 AND role = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_first_with_role(
        &self,
        community_id: Snowflake,
        role: &str,
    ) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, community_id, user_id, role, created_at
            FROM members
            WHERE community_id = $1 AND role = $2
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(community_id.into_inner())
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, community_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE user_id = $1 AND community_id = $2)",
        )
        .bind(user_id.into_inner())
        .bind(community_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn insert(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO members (id, community_id, user_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.community_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(&member.role)
        .bind(member.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_member_insert_error(e, member))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_community(
        &self,
        community_id: Snowflake,
        page: Page,
    ) -> RepoResult<Paged<Member>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE community_id = $1")
                .bind(community_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, community_id, user_id, role, created_at
            FROM members
            WHERE community_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(community_id.into_inner())
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Paged::new(
            results.into_iter().map(Member::from).collect(),
            to_total(total),
        ))
    }
}
