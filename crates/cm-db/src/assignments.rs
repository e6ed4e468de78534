//! Task assignment repository
//!
//! Table: task_assignments, unique on (consultant_id, task_id).

use async_trait::async_trait;
use cm_core::traits::Id;
use cm_models::Assignment;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};
use crate::store::AssignmentStore;

pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn assign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<Assignment> {
        sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO task_assignments (consultant_id, task_id, assigned_at)
            VALUES ($1, $2, NOW())
            RETURNING id, consultant_id, task_id, assigned_at
            "#,
        )
        .bind(consultant_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_constraint(e, || {
                format!(
                    "Consultant {} is already assigned to task {}",
                    consultant_id, task_id
                )
            })
        })
    }

    async fn unassign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool> {
        let result =
            sqlx::query("DELETE FROM task_assignments WHERE consultant_id = $1 AND task_id = $2")
                .bind(consultant_id)
                .bind(task_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_assigned(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM task_assignments WHERE consultant_id = $1 AND task_id = $2)",
        )
        .bind(consultant_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn consultants_for_task(&self, task_id: Id) -> RepositoryResult<Vec<Id>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT consultant_id FROM task_assignments WHERE task_id = $1 ORDER BY consultant_id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
