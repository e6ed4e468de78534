//! Task repository

use async_trait::async_trait;
use cm_core::traits::{Entity, Id};
use cm_models::{Task, TaskParams};
use sqlx::PgPool;

use crate::repository::{Repository, RepositoryError, RepositoryResult, UpdatableRepository};
use crate::store::TaskStore;

/// Task repository implementation
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Task, TaskParams> for TaskRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, duration_hours, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, description, duration_hours, created_at, updated_at
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: TaskParams) -> RepositoryResult<Task> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, description, duration_hours, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, name, description, duration_hours, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.duration_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Task::TYPE_NAME, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UpdatableRepository<Task, TaskParams> for TaskRepository {
    async fn update(&self, id: Id, dto: TaskParams) -> RepositoryResult<Task> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                name = $1,
                description = $2,
                duration_hours = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, description, duration_hours, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.duration_hours)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found(Task::TYPE_NAME, id))
    }
}

impl TaskStore for TaskRepository {}
