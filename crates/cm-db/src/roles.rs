//! Role repository
//!
//! Database operations for billable roles.

use async_trait::async_trait;
use cm_core::traits::{Entity, Id};
use cm_models::{Role, RoleParams};
use sqlx::PgPool;

use crate::repository::{Repository, RepositoryError, RepositoryResult, UpdatableRepository};
use crate::store::RoleStore;

/// Role repository implementation
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Role, RoleParams> for RoleRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Role>> {
        let row = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, rate_per_hour, created_at, updated_at
            FROM consultant_roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, rate_per_hour, created_at, updated_at
            FROM consultant_roles
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM consultant_roles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: RoleParams) -> RepositoryResult<Role> {
        let row = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO consultant_roles (name, rate_per_hour, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, name, rate_per_hour, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.rate_per_hour)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM consultant_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_constraint(e, || {
                    format!("Role {} is still assigned to consultants", id)
                })
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Role::TYPE_NAME, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM consultant_roles WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UpdatableRepository<Role, RoleParams> for RoleRepository {
    async fn update(&self, id: Id, dto: RoleParams) -> RepositoryResult<Role> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE consultant_roles SET
                name = $1,
                rate_per_hour = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, rate_per_hour, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.rate_per_hour)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found(Role::TYPE_NAME, id))
    }
}

impl RoleStore for RoleRepository {}
