//! PostgreSQL implementation of CommunityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{
    Community, CommunityRepository, DomainError, Member, Page, Paged, RepoResult, Snowflake,
};

use crate::models::CommunityModel;

use super::error::{
    map_db_error, map_member_insert_error, map_unique_violation, to_total, COMMUNITIES_SLUG_UNIQUE,
};

#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn slug_conflict(slug: &str, constraint: Option<&str>) -> DomainError {
    match constraint {
        Some(COMMUNITIES_SLUG_UNIQUE) => DomainError::SlugTaken(slug.to_string()),
        other => DomainError::DatabaseError(format!(
            "unexpected unique violation: {}",
            other.unwrap_or("unknown")
        )),
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Community>> {
        let result = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT id, name, slug, created_at, updated_at
            FROM communities
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Community::from))
    }

    #[instrument(skip(self, community, admin), fields(community_id = %community.id))]
    async fn create_with_initial_admin(
        &self,
        community: &Community,
        admin: &Member,
    ) -> RepoResult<()> {
        // Dropping the transaction without commit rolls back both inserts
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO communities (id, name, slug, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(&community.slug)
        .bind(community.created_at)
        .bind(community.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, |c| slug_conflict(&community.slug, c)))?;

        sqlx::query(
            r"
            INSERT INTO members (id, community_id, user_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(admin.id.into_inner())
        .bind(admin.community_id.into_inner())
        .bind(admin.user_id.into_inner())
        .bind(&admin.role)
        .bind(admin.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_member_insert_error(e, admin))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, community), fields(community_id = %community.id))]
    async fn update(&self, community: &Community) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE communities
            SET name = $2, slug = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(community.id.into_inner())
        .bind(&community.name)
        .bind(&community.slug)
        .bind(community.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |c| slug_conflict(&community.slug, c)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommunityNotFound(community.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> RepoResult<Paged<Community>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM communities")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT id, name, slug, created_at, updated_at
            FROM communities
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Paged::new(
            results.into_iter().map(Community::from).collect(),
            to_total(total),
        ))
    }

    #[instrument(skip(self))]
    async fn list_by_member_role(
        &self,
        user_id: Snowflake,
        role: &str,
        page: Page,
    ) -> RepoResult<Paged<Community>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE user_id = $1 AND role = $2",
        )
        .bind(user_id.into_inner())
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT c.id, c.name, c.slug, c.created_at, c.updated_at
            FROM communities c
            JOIN members m ON m.community_id = c.id
            WHERE m.user_id = $1 AND m.role = $2
            ORDER BY c.id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(user_id.into_inner())
        .bind(role)
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Paged::new(
            results.into_iter().map(Community::from).collect(),
            to_total(total),
        ))
    }

    #[instrument(skip(self))]
    async fn list_by_member(&self, user_id: Snowflake, page: Page) -> RepoResult<Paged<Community>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE user_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, CommunityModel>(
            r"
            SELECT c.id, c.name, c.slug, c.created_at, c.updated_at
            FROM communities c
            JOIN members m ON m.community_id = c.id
            WHERE m.user_id = $1
            ORDER BY c.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Paged::new(
            results.into_iter().map(Community::from).collect(),
            to_total(total),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommunityRepository>();
    }

    #[test]
    fn test_slug_conflict_mapping() {
        assert!(matches!(
            slug_conflict("acme", Some(COMMUNITIES_SLUG_UNIQUE)),
            DomainError::SlugTaken(slug) if slug == "acme"
        ));
        assert!(matches!(
            slug_conflict("acme", None),
            DomainError::DatabaseError(_)
        ));
    }
}
