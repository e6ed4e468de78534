//! Work ledger
//!
//! Admits work entries, snapshots the billing rate and enforces the daily
//! hour cap per consultant.
//!
//! Admission checks run in a fixed order and stop at the first failure:
//!
//! 1. consultant exists (`NotFound`)
//! 2. task exists (`NotFound`)
//! 3. consultant is assigned to the task (`FailedPrecondition`)
//! 4. hours are positive (`InvalidArgument`)
//! 5. hours already logged that date plus the new hours stay within the cap
//!    (`ResourceExhausted`)
//!
//! Step 5, the role rate lookup and the insert happen while holding the
//! [`DailyLocks`] guard for `(consultant, date)`, so two concurrent
//! submissions for the same day cannot both pass the cap check. A sum that
//! overflows counts as over the cap.
//!
//! The consultant row is read before the guard is taken. A role change
//! racing with a submission is last-write-wins: the entry snapshots
//! whichever role the consultant had when it was loaded.

use cm_contracts::WorkEntryContract;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_core::types::DEFAULT_DAILY_HOUR_CAP;
use cm_models::{Consultant, NewWorkEntry, Role, Task, WorkEntry, WorkEntryParams};
use rust_decimal::Decimal;

use crate::base::{validate, SharedStorage};
use crate::locks::DailyLocks;

#[derive(Clone)]
pub struct WorkLedger {
    storage: SharedStorage,
    contract: WorkEntryContract,
    locks: DailyLocks,
    daily_hour_cap: Decimal,
}

impl WorkLedger {
    pub fn new(storage: SharedStorage) -> Self {
        Self::with_cap(storage, Decimal::from(DEFAULT_DAILY_HOUR_CAP))
    }

    pub fn with_cap(storage: SharedStorage, daily_hour_cap: Decimal) -> Self {
        Self {
            storage,
            contract: WorkEntryContract,
            locks: DailyLocks::new(),
            daily_hour_cap,
        }
    }

    pub fn daily_hour_cap(&self) -> Decimal {
        self.daily_hour_cap
    }

    pub async fn record_work(&self, params: WorkEntryParams) -> LedgerResult<WorkEntry> {
        let consultant = self
            .storage
            .consultants()
            .find_by_id(params.consultant_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Consultant::TYPE_NAME, params.consultant_id))?;

        if !self.storage.tasks().exists(params.task_id).await? {
            return Err(LedgerError::not_found(Task::TYPE_NAME, params.task_id));
        }

        let assigned = self
            .storage
            .assignments()
            .is_assigned(consultant.id, params.task_id)
            .await?;
        if !assigned {
            tracing::warn!(
                consultant_id = consultant.id,
                task_id = params.task_id,
                "Work refused, consultant not assigned"
            );
            return Err(LedgerError::failed_precondition(format!(
                "Consultant {} is not assigned to this task",
                consultant.id
            )));
        }

        validate(&self.contract, &params)?;

        let _guard = self.locks.acquire(consultant.id, params.work_date).await;

        let logged_hours = self
            .storage
            .work_entries()
            .hours_on(consultant.id, params.work_date)
            .await?;
        let within_cap = logged_hours
            .checked_add(params.hours_worked)
            .is_some_and(|total| total <= self.daily_hour_cap);
        if !within_cap {
            tracing::warn!(
                consultant_id = consultant.id,
                work_date = %params.work_date,
                logged = %logged_hours,
                requested = %params.hours_worked,
                "Daily hour cap reached"
            );
            return Err(LedgerError::DailyCapExceeded {
                consultant_id: consultant.id,
                work_date: params.work_date,
                logged_hours,
                requested_hours: params.hours_worked,
                cap: self.daily_hour_cap,
            });
        }

        let role = self
            .storage
            .roles()
            .find_by_id(consultant.consultant_role_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Role::TYPE_NAME, consultant.consultant_role_id))?;

        let entry = self
            .storage
            .work_entries()
            .create(NewWorkEntry::snapshot(&params, role.rate_per_hour))
            .await?;

        tracing::info!(
            entry_id = entry.id,
            consultant_id = entry.consultant_id,
            task_id = entry.task_id,
            hours = %entry.hours_worked,
            rate = %entry.rate_per_hour_at_time_of_work,
            "Work recorded"
        );
        Ok(entry)
    }

    pub async fn get_entry(&self, id: Id) -> LedgerResult<WorkEntry> {
        self.storage
            .work_entries()
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(WorkEntry::TYPE_NAME, id))
    }

    pub async fn list_entries(&self) -> LedgerResult<Vec<WorkEntry>> {
        Ok(self.storage.work_entries().find_all().await?)
    }

    /// Hard delete; freeing capacity needs no cap check
    pub async fn delete_entry(&self, id: Id) -> LedgerResult<()> {
        self.storage.work_entries().delete(id).await?;
        tracing::info!(entry_id = id, "Work entry deleted");
        Ok(())
    }
}
