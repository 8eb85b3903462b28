//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::{DomainError, Page, Paged, RepoResult, Role, RoleRepository, Snowflake};

use crate::models::RoleModel;

use super::error::{map_db_error, map_unique_violation, to_total};

#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Role>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, RoleModel>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE name = ANY($1)",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self, role), fields(role = %role.name))]
    async fn create(&self, role: &Role) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO roles (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(role.id.into_inner())
        .bind(&role.name)
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::RoleAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, role), fields(role = %role.name))]
    async fn create_if_absent(&self, role: &Role) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO roles (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(role.id.into_inner())
        .bind(&role.name)
        .bind(role.created_at)
        .bind(role.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> RepoResult<Paged<Role>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, RoleModel>(
            r"
            SELECT id, name, created_at, updated_at
            FROM roles
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
            results.into_iter().map(Role::from).collect(),
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
        assert_send_sync::<PgRoleRepository>();
    }
}
