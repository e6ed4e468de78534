//! Work entry repository
//!
//! Rows are insert-only; there is no update path for a recorded entry.

use async_trait::async_trait;
use chrono::NaiveDate;
use cm_core::traits::{Entity, Id};
use cm_core::types::DateRange;
use cm_models::{NewWorkEntry, WorkEntry};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::repository::{Repository, RepositoryError, RepositoryResult};
use crate::store::WorkEntryStore;

/// Work entry repository implementation
pub struct WorkEntryRepository {
    pool: PgPool,
}

impl WorkEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<WorkEntry, NewWorkEntry> for WorkEntryRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<WorkEntry>> {
        let row = sqlx::query_as::<_, WorkEntry>(
            r#"
            SELECT id, consultant_id, task_id, work_date, hours_worked,
                   rate_per_hour_at_time_of_work, created_at, updated_at
            FROM work_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<WorkEntry>> {
        let rows = sqlx::query_as::<_, WorkEntry>(
            r#"
            SELECT id, consultant_id, task_id, work_date, hours_worked,
                   rate_per_hour_at_time_of_work, created_at, updated_at
            FROM work_entries
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM work_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: NewWorkEntry) -> RepositoryResult<WorkEntry> {
        sqlx::query_as::<_, WorkEntry>(
            r#"
            INSERT INTO work_entries (
                consultant_id, task_id, work_date, hours_worked,
                rate_per_hour_at_time_of_work, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, NOW(), NOW()
            )
            RETURNING id, consultant_id, task_id, work_date, hours_worked,
                      rate_per_hour_at_time_of_work, created_at, updated_at
            "#,
        )
        .bind(dto.consultant_id)
        .bind(dto.task_id)
        .bind(dto.work_date)
        .bind(dto.hours_worked)
        .bind(dto.rate_per_hour_at_time_of_work)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_constraint(e, || {
                format!(
                    "Consultant {} or task {} no longer exists",
                    dto.consultant_id, dto.task_id
                )
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM work_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(WorkEntry::TYPE_NAME, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM work_entries WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl WorkEntryStore for WorkEntryRepository {
    async fn hours_on(&self, consultant_id: Id, work_date: NaiveDate) -> RepositoryResult<Decimal> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(hours_worked) FROM work_entries WHERE consultant_id = $1 AND work_date = $2",
        )
        .bind(consultant_id)
        .bind(work_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn find_for_consultant_between(
        &self,
        consultant_id: Id,
        range: DateRange,
    ) -> RepositoryResult<Vec<WorkEntry>> {
        let rows = sqlx::query_as::<_, WorkEntry>(
            r#"
            SELECT id, consultant_id, task_id, work_date, hours_worked,
                   rate_per_hour_at_time_of_work, created_at, updated_at
            FROM work_entries
            WHERE consultant_id = $1 AND work_date >= $2 AND work_date <= $3
            ORDER BY work_date ASC, id ASC
            "#,
        )
        .bind(consultant_id)
        .bind(range.start_date())
        .bind(range.end_date())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
