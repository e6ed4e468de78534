//! Payment summarizer
//!
//! Totals are computed from the rate stored on each entry, never from the
//! consultant's current role.

use chrono::NaiveDate;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_core::types::DateRange;
use cm_models::{Consultant, PaymentSummary};

use crate::base::SharedStorage;

#[derive(Clone)]
pub struct PaymentSummarizer {
    storage: SharedStorage,
}

impl PaymentSummarizer {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Aggregate a consultant's entries over an inclusive date range
    pub async fn summarize(
        &self,
        consultant_id: Id,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LedgerResult<PaymentSummary> {
        let range = DateRange::new(start_date, end_date)?;

        let consultant = self
            .storage
            .consultants()
            .find_by_id(consultant_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Consultant::TYPE_NAME, consultant_id))?;

        let entries = self
            .storage
            .work_entries()
            .find_for_consultant_between(consultant_id, range)
            .await?;

        tracing::debug!(
            consultant_id,
            start = %start_date,
            end = %end_date,
            entries = entries.len(),
            "Payment summary computed"
        );
        PaymentSummary::tally(&consultant, range, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::WorkLedger;
    use cm_core::error::ErrorKind;
    use cm_db::{MemoryStorage, Storage};
    use cm_models::{ConsultantParams, RoleParams, TaskParams, WorkEntryParams};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    async fn setup() -> (Arc<MemoryStorage>, WorkLedger, PaymentSummarizer, Id, Id) {
        let storage = Arc::new(MemoryStorage::seeded());
        let consultant = storage
            .consultants()
            .create(ConsultantParams::new("Ada", "Lovelace", "ada@example.com", 1))
            .await
            .unwrap();
        let task = storage
            .tasks()
            .create(TaskParams::new("Audit", Decimal::from(40)))
            .await
            .unwrap();
        storage.assignments().assign(consultant.id, task.id).await.unwrap();
        (
            storage.clone(),
            WorkLedger::new(storage.clone()),
            PaymentSummarizer::new(storage),
            consultant.id,
            task.id,
        )
    }

    #[tokio::test]
    async fn test_cap_scenario_totals() {
        let (storage, ledger, summaries, consultant_id, task_id) = setup().await;
        let log = |hours: i64| WorkEntryParams::new(consultant_id, task_id, date(1, 1), Decimal::from(hours));

        ledger.record_work(log(5)).await.unwrap();
        assert!(ledger.record_work(log(8)).await.is_err());
        ledger.record_work(log(7)).await.unwrap();

        let summary = summaries
            .summarize(consultant_id, date(1, 1), date(1, 1))
            .await
            .unwrap();
        assert_eq!(summary.total_hours, Decimal::from(12));
        assert_eq!(summary.total_amount, Decimal::new(60000, 2));
        assert_eq!(summary.consultant_name, "Ada Lovelace");

        // Raising the role rate does not reprice history
        storage
            .roles()
            .update(1, RoleParams::new("Consultant Level 1", Decimal::new(7500, 2)))
            .await
            .unwrap();
        let again = summaries
            .summarize(consultant_id, date(1, 1), date(1, 1))
            .await
            .unwrap();
        assert_eq!(again.total_amount, Decimal::from(600));
    }

    #[tokio::test]
    async fn test_history_survives_unassign() {
        let (storage, ledger, summaries, consultant_id, task_id) = setup().await;
        ledger
            .record_work(WorkEntryParams::new(consultant_id, task_id, date(2, 3), Decimal::from(4)))
            .await
            .unwrap();
        let before = summaries
            .summarize(consultant_id, date(2, 1), date(2, 28))
            .await
            .unwrap();

        storage.assignments().unassign(consultant_id, task_id).await.unwrap();

        let after = summaries
            .summarize(consultant_id, date(2, 1), date(2, 28))
            .await
            .unwrap();
        assert_eq!(before.work_entries, after.work_entries);
        assert_eq!(after.total_amount, Decimal::from(200));
    }

    #[tokio::test]
    async fn test_range_bounds_and_order() {
        let (_, ledger, summaries, consultant_id, task_id) = setup().await;
        for (day, hours) in [(10, 2), (1, 3), (10, 1), (31, 4)] {
            ledger
                .record_work(WorkEntryParams::new(
                    consultant_id,
                    task_id,
                    date(3, day),
                    Decimal::from(hours),
                ))
                .await
                .unwrap();
        }

        let summary = summaries
            .summarize(consultant_id, date(3, 1), date(3, 10))
            .await
            .unwrap();
        let ids: Vec<Id> = summary.work_entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(summary.total_hours, Decimal::from(6));
        assert_eq!(summary.total_amount, Decimal::from(300));
    }

    #[tokio::test]
    async fn test_empty_range() {
        let (_, _, summaries, consultant_id, _) = setup().await;
        let summary = summaries
            .summarize(consultant_id, date(6, 1), date(6, 30))
            .await
            .unwrap();
        assert!(summary.work_entries.is_empty());
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.total_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_inverted_range_is_checked_first() {
        let (_, _, summaries, _, _) = setup().await;
        let err = summaries
            .summarize(99, date(2, 1), date(1, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = summaries
            .summarize(99, date(1, 1), date(2, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
