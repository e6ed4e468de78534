//! Consultant repository

use async_trait::async_trait;
use cm_core::traits::{Entity, Id};
use cm_models::{Consultant, ConsultantParams};
use sqlx::PgPool;

use crate::repository::{Repository, RepositoryError, RepositoryResult, UpdatableRepository};
use crate::store::ConsultantStore;

const COLUMNS: &str = "id, first_name, last_name, email, profile_image_path, consultant_role_id, created_at, updated_at";

/// Consultant repository implementation
pub struct ConsultantRepository {
    pool: PgPool,
}

impl ConsultantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn role_missing(role_id: Id) -> impl FnOnce() -> String {
    move || format!("Role {} does not exist", role_id)
}

#[async_trait]
impl Repository<Consultant, ConsultantParams> for ConsultantRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Consultant>> {
        let row = sqlx::query_as::<_, Consultant>(&format!(
            "SELECT {} FROM consultants WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Consultant>> {
        let rows = sqlx::query_as::<_, Consultant>(&format!(
            "SELECT {} FROM consultants ORDER BY id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM consultants")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: ConsultantParams) -> RepositoryResult<Consultant> {
        sqlx::query_as::<_, Consultant>(&format!(
            r#"
            INSERT INTO consultants (first_name, last_name, email, consultant_role_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(dto.consultant_role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_constraint(e, role_missing(dto.consultant_role_id)))
    }

    /// Assignments and work entries go with the consultant (`ON DELETE CASCADE`)
    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM consultants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Consultant::TYPE_NAME, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM consultants WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UpdatableRepository<Consultant, ConsultantParams> for ConsultantRepository {
    async fn update(&self, id: Id, dto: ConsultantParams) -> RepositoryResult<Consultant> {
        sqlx::query_as::<_, Consultant>(&format!(
            r#"
            UPDATE consultants SET
                first_name = $1,
                last_name = $2,
                email = $3,
                consultant_role_id = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(dto.consultant_role_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_constraint(e, role_missing(dto.consultant_role_id)))?
        .ok_or_else(|| RepositoryError::not_found(Consultant::TYPE_NAME, id))
    }
}

impl ConsultantStore for ConsultantRepository {}
