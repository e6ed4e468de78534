//! Work entry and payment summary representers

use std::collections::HashMap;

use chrono::NaiveDate;
use cm_core::result::LedgerResult;
use cm_core::traits::Id;
use cm_models::{PaymentSummary, WorkEntry};
use cm_services::LedgerServices;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryRepresentation {
    pub id: Id,
    pub consultant_id: Id,
    pub consultant_name: String,
    pub task_id: Id,
    pub task_name: String,
    pub work_date: NaiveDate,
    pub hours_worked: Decimal,
    pub rate_per_hour_at_time_of_work: Decimal,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummaryRepresentation {
    pub consultant_id: Id,
    pub consultant_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub work_entries: Vec<WorkEntryRepresentation>,
}

/// Consultant and task display names keyed by id
#[derive(Debug, Default)]
pub struct NameIndex {
    consultants: HashMap<Id, String>,
    tasks: HashMap<Id, String>,
}

impl NameIndex {
    pub async fn load(services: &LedgerServices) -> LedgerResult<Self> {
        let consultants = services
            .consultants
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.full_name()))
            .collect();
        let tasks = services
            .tasks
            .list()
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();
        Ok(Self { consultants, tasks })
    }

    /// Index for a single entry
    pub async fn for_entry(services: &LedgerServices, entry: &WorkEntry) -> LedgerResult<Self> {
        let consultant = services.consultants.get(entry.consultant_id).await?;
        let task = services.tasks.get(entry.task_id).await?;
        let mut index = Self::default();
        index.consultants.insert(consultant.id, consultant.full_name());
        index.tasks.insert(task.id, task.name);
        Ok(index)
    }

    fn consultant(&self, id: Id) -> String {
        self.consultants.get(&id).cloned().unwrap_or_default()
    }

    fn task(&self, id: Id) -> String {
        self.tasks.get(&id).cloned().unwrap_or_default()
    }
}

pub struct WorkEntryRepresenter;

impl WorkEntryRepresenter {
    pub fn represent(entry: WorkEntry, names: &NameIndex) -> LedgerResult<WorkEntryRepresentation> {
        Ok(WorkEntryRepresentation {
            id: entry.id,
            consultant_id: entry.consultant_id,
            consultant_name: names.consultant(entry.consultant_id),
            task_id: entry.task_id,
            task_name: names.task(entry.task_id),
            work_date: entry.work_date,
            hours_worked: entry.hours_worked,
            rate_per_hour_at_time_of_work: entry.rate_per_hour_at_time_of_work,
            total_amount: entry.total_amount()?,
        })
    }

    pub fn represent_summary(
        summary: PaymentSummary,
        names: &NameIndex,
    ) -> LedgerResult<PaymentSummaryRepresentation> {
        let work_entries = summary
            .work_entries
            .into_iter()
            .map(|e| Self::represent(e, names))
            .collect::<LedgerResult<Vec<_>>>()?;

        Ok(PaymentSummaryRepresentation {
            consultant_id: summary.consultant_id,
            consultant_name: summary.consultant_name,
            start_date: summary.start_date,
            end_date: summary.end_date,
            total_hours: summary.total_hours,
            total_amount: summary.total_amount,
            work_entries,
        })
    }
}
