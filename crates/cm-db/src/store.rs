//! Per-entity store traits and the storage bundle
//!
//! Every entity lives in an id-keyed store; relations are plain id fields
//! resolved through these lookups. Services only ever see `dyn Storage`.

use async_trait::async_trait;
use chrono::NaiveDate;
use cm_core::traits::Id;
use cm_core::types::DateRange;
use cm_models::{
    Assignment, Consultant, ConsultantParams, NewWorkEntry, Role, RoleParams, Task, TaskParams,
    WorkEntry,
};
use rust_decimal::Decimal;

use crate::repository::{Repository, RepositoryResult, UpdatableRepository};

/// Roles. Deleting a role still referenced by a consultant is a `Conflict`.
pub trait RoleStore: Repository<Role, RoleParams> + UpdatableRepository<Role, RoleParams> {}

/// Consultants. Deleting one removes its assignments and work entries.
pub trait ConsultantStore:
    Repository<Consultant, ConsultantParams> + UpdatableRepository<Consultant, ConsultantParams>
{
}

/// Tasks. Deleting one removes its assignments and work entries.
pub trait TaskStore: Repository<Task, TaskParams> + UpdatableRepository<Task, TaskParams> {}

#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Insert the pair; `Conflict` when it already exists
    async fn assign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<Assignment>;

    /// Remove the pair, returning whether anything was removed
    async fn unassign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool>;

    async fn is_assigned(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool>;

    /// Consultant ids assigned to a task, ascending
    async fn consultants_for_task(&self, task_id: Id) -> RepositoryResult<Vec<Id>>;
}

#[async_trait]
pub trait WorkEntryStore: Repository<WorkEntry, NewWorkEntry> {
    /// Hours already logged by a consultant on one date (zero when none)
    async fn hours_on(&self, consultant_id: Id, work_date: NaiveDate) -> RepositoryResult<Decimal>;

    /// Entries inside an inclusive date range, ordered by work date then id
    async fn find_for_consultant_between(
        &self,
        consultant_id: Id,
        range: DateRange,
    ) -> RepositoryResult<Vec<WorkEntry>>;
}

/// Bundle of all stores behind one backend
#[async_trait]
pub trait Storage: Send + Sync {
    fn roles(&self) -> &dyn RoleStore;
    fn consultants(&self) -> &dyn ConsultantStore;
    fn tasks(&self) -> &dyn TaskStore;
    fn assignments(&self) -> &dyn AssignmentStore;
    fn work_entries(&self) -> &dyn WorkEntryStore;

    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}
