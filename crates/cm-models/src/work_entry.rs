//! Work entry model
//!
//! Table: work_entries

use chrono::{DateTime, NaiveDate, Utc};
use cm_core::result::LedgerResult;
use cm_core::traits::{ConsultantScoped, Entity, Id, Identifiable, Timestamped};
use cm_core::types::billed_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours a consultant logged against a task on one calendar date
///
/// `rate_per_hour_at_time_of_work` is copied from the consultant's role when
/// the entry is recorded and is never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: Id,
    pub consultant_id: Id,
    pub task_id: Id,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub rate_per_hour_at_time_of_work: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkEntry {
    /// hours × snapshotted rate
    pub fn total_amount(&self) -> LedgerResult<Decimal> {
        billed_amount(self.hours_worked, self.rate_per_hour_at_time_of_work)
    }
}

impl Identifiable for WorkEntry {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for WorkEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl ConsultantScoped for WorkEntry {
    fn consultant_id(&self) -> Id {
        self.consultant_id
    }
}

impl Entity for WorkEntry {
    const TABLE_NAME: &'static str = "work_entries";
    const TYPE_NAME: &'static str = "WorkEntry";
}

/// Work submission as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryParams {
    pub consultant_id: Id,
    pub task_id: Id,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
}

impl WorkEntryParams {
    pub fn new(consultant_id: Id, task_id: Id, work_date: NaiveDate, hours_worked: Decimal) -> Self {
        Self {
            consultant_id,
            task_id,
            work_date,
            hours_worked,
        }
    }
}

/// Admitted work entry ready to persist, rate already snapshotted
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkEntry {
    pub consultant_id: Id,
    pub task_id: Id,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub rate_per_hour_at_time_of_work: Decimal,
}

impl NewWorkEntry {
    pub fn snapshot(params: &WorkEntryParams, rate_per_hour: Decimal) -> Self {
        Self {
            consultant_id: params.consultant_id,
            task_id: params.task_id,
            work_date: params.work_date,
            hours_worked: params.hours_worked,
            rate_per_hour_at_time_of_work: rate_per_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_amount_uses_snapshot_rate() {
        let now = Utc::now();
        let entry = WorkEntry {
            id: 1,
            consultant_id: 1,
            task_id: 1,
            work_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            hours_worked: Decimal::new(5, 0),
            rate_per_hour_at_time_of_work: Decimal::new(5000, 2),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(entry.total_amount().unwrap(), Decimal::new(25000, 2));
    }

    #[test]
    fn test_total_amount_overflow_is_an_error() {
        let now = Utc::now();
        let entry = WorkEntry {
            id: 1,
            consultant_id: 1,
            task_id: 1,
            work_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            hours_worked: Decimal::from(5),
            rate_per_hour_at_time_of_work: Decimal::MAX,
            created_at: now,
            updated_at: now,
        };
        assert!(entry.total_amount().is_err());
    }

    #[test]
    fn test_params_accept_string_and_number_hours() {
        let from_string: WorkEntryParams = serde_json::from_str(
            r#"{"consultantId":1,"taskId":2,"workDate":"2025-01-01","hoursWorked":"7.5"}"#,
        )
        .unwrap();
        let from_number: WorkEntryParams = serde_json::from_str(
            r#"{"consultantId":1,"taskId":2,"workDate":"2025-01-01","hoursWorked":7}"#,
        )
        .unwrap();

        assert_eq!(from_string.hours_worked, Decimal::new(75, 1));
        assert_eq!(from_number.hours_worked, Decimal::from(7));
        assert_eq!(from_string.work_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
