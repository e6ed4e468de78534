//! In-memory storage backend
//!
//! All tables share one lock so cascades and restrict checks see a
//! consistent view. Ids start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use cm_core::traits::{Entity, Id};
use cm_core::types::DateRange;
use cm_models::{
    Assignment, Consultant, ConsultantParams, NewWorkEntry, Role, RoleParams, Task, TaskParams,
    WorkEntry,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::repository::{Repository, RepositoryError, RepositoryResult, UpdatableRepository};
use crate::store::{
    AssignmentStore, ConsultantStore, RoleStore, Storage, TaskStore, WorkEntryStore,
};

#[derive(Debug, Default)]
struct Tables {
    roles: BTreeMap<Id, Role>,
    consultants: BTreeMap<Id, Consultant>,
    tasks: BTreeMap<Id, Task>,
    assignments: BTreeMap<Id, Assignment>,
    work_entries: BTreeMap<Id, WorkEntry>,
    sequences: Sequences,
}

#[derive(Debug, Default)]
struct Sequences {
    roles: Id,
    consultants: Id,
    tasks: Id,
    assignments: Id,
    work_entries: Id,
}

fn next(seq: &mut Id) -> Id {
    *seq += 1;
    *seq
}

impl Tables {
    /// Drop every assignment and work entry matching the predicate
    fn cascade(&mut self, assignment: impl Fn(&Assignment) -> bool, entry: impl Fn(&WorkEntry) -> bool) {
        self.assignments.retain(|_, a| !assignment(a));
        self.work_entries.retain(|_, e| !entry(e));
    }
}

type Shared = Arc<RwLock<Tables>>;

/// Arena-backed storage for tests and database-less runs
#[derive(Clone)]
pub struct MemoryStorage {
    roles: MemoryRoles,
    consultants: MemoryConsultants,
    tasks: MemoryTasks,
    assignments: MemoryAssignments,
    work_entries: MemoryWorkEntries,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let tables: Shared = Arc::default();
        Self {
            roles: MemoryRoles(tables.clone()),
            consultants: MemoryConsultants(tables.clone()),
            tasks: MemoryTasks(tables.clone()),
            assignments: MemoryAssignments(tables.clone()),
            work_entries: MemoryWorkEntries(tables),
        }
    }

    /// Storage preloaded with the two default roles
    pub fn seeded() -> Self {
        let storage = Self::new();
        {
            let mut tables = storage.roles.0.write();
            for (name, cents) in [("Consultant Level 1", 5000), ("Consultant Level 2", 7500)] {
                let now = Utc::now();
                let id = next(&mut tables.sequences.roles);
                tables.roles.insert(
                    id,
                    Role {
                        id,
                        name: name.to_string(),
                        rate_per_hour: Decimal::new(cents, 2),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        storage
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn roles(&self) -> &dyn RoleStore {
        &self.roles
    }

    fn consultants(&self) -> &dyn ConsultantStore {
        &self.consultants
    }

    fn tasks(&self) -> &dyn TaskStore {
        &self.tasks
    }

    fn assignments(&self) -> &dyn AssignmentStore {
        &self.assignments
    }

    fn work_entries(&self) -> &dyn WorkEntryStore {
        &self.work_entries
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryRoles(Shared);

#[async_trait]
impl Repository<Role, RoleParams> for MemoryRoles {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Role>> {
        Ok(self.0.read().roles.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Role>> {
        Ok(self.0.read().roles.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.0.read().roles.len() as i64)
    }

    async fn create(&self, dto: RoleParams) -> RepositoryResult<Role> {
        let mut tables = self.0.write();
        let now = Utc::now();
        let id = next(&mut tables.sequences.roles);
        let role = Role {
            id,
            name: dto.name,
            rate_per_hour: dto.rate_per_hour,
            created_at: now,
            updated_at: now,
        };
        tables.roles.insert(id, role.clone());
        Ok(role)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.0.write();
        if !tables.roles.contains_key(&id) {
            return Err(RepositoryError::not_found(Role::TYPE_NAME, id));
        }
        if tables.consultants.values().any(|c| c.consultant_role_id == id) {
            return Err(RepositoryError::Conflict(format!(
                "Role {} is still assigned to consultants",
                id
            )));
        }
        tables.roles.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.0.read().roles.contains_key(&id))
    }
}

#[async_trait]
impl UpdatableRepository<Role, RoleParams> for MemoryRoles {
    async fn update(&self, id: Id, dto: RoleParams) -> RepositoryResult<Role> {
        let mut tables = self.0.write();
        let role = tables
            .roles
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Role::TYPE_NAME, id))?;
        role.name = dto.name;
        role.rate_per_hour = dto.rate_per_hour;
        role.updated_at = Utc::now();
        Ok(role.clone())
    }
}

impl RoleStore for MemoryRoles {}

// ---------------------------------------------------------------------------
// Consultants
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryConsultants(Shared);

fn missing_role(role_id: Id) -> RepositoryError {
    RepositoryError::Conflict(format!("Role {} does not exist", role_id))
}

#[async_trait]
impl Repository<Consultant, ConsultantParams> for MemoryConsultants {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Consultant>> {
        Ok(self.0.read().consultants.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Consultant>> {
        Ok(self.0.read().consultants.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.0.read().consultants.len() as i64)
    }

    async fn create(&self, dto: ConsultantParams) -> RepositoryResult<Consultant> {
        let mut tables = self.0.write();
        if !tables.roles.contains_key(&dto.consultant_role_id) {
            return Err(missing_role(dto.consultant_role_id));
        }
        let now = Utc::now();
        let id = next(&mut tables.sequences.consultants);
        let consultant = Consultant {
            id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            profile_image_path: None,
            consultant_role_id: dto.consultant_role_id,
            created_at: now,
            updated_at: now,
        };
        tables.consultants.insert(id, consultant.clone());
        Ok(consultant)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.0.write();
        if tables.consultants.remove(&id).is_none() {
            return Err(RepositoryError::not_found(Consultant::TYPE_NAME, id));
        }
        tables.cascade(|a| a.consultant_id == id, |e| e.consultant_id == id);
        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.0.read().consultants.contains_key(&id))
    }
}

#[async_trait]
impl UpdatableRepository<Consultant, ConsultantParams> for MemoryConsultants {
    async fn update(&self, id: Id, dto: ConsultantParams) -> RepositoryResult<Consultant> {
        let mut tables = self.0.write();
        if !tables.consultants.contains_key(&id) {
            return Err(RepositoryError::not_found(Consultant::TYPE_NAME, id));
        }
        if !tables.roles.contains_key(&dto.consultant_role_id) {
            return Err(missing_role(dto.consultant_role_id));
        }
        let consultant = tables
            .consultants
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Consultant::TYPE_NAME, id))?;
        consultant.first_name = dto.first_name;
        consultant.last_name = dto.last_name;
        consultant.email = dto.email;
        consultant.consultant_role_id = dto.consultant_role_id;
        consultant.updated_at = Utc::now();
        Ok(consultant.clone())
    }
}

impl ConsultantStore for MemoryConsultants {}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryTasks(Shared);

#[async_trait]
impl Repository<Task, TaskParams> for MemoryTasks {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Task>> {
        Ok(self.0.read().tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Task>> {
        Ok(self.0.read().tasks.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.0.read().tasks.len() as i64)
    }

    async fn create(&self, dto: TaskParams) -> RepositoryResult<Task> {
        let mut tables = self.0.write();
        let now = Utc::now();
        let id = next(&mut tables.sequences.tasks);
        let task = Task {
            id,
            name: dto.name,
            description: dto.description,
            duration_hours: dto.duration_hours,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.0.write();
        if tables.tasks.remove(&id).is_none() {
            return Err(RepositoryError::not_found(Task::TYPE_NAME, id));
        }
        tables.cascade(|a| a.task_id == id, |e| e.task_id == id);
        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.0.read().tasks.contains_key(&id))
    }
}

#[async_trait]
impl UpdatableRepository<Task, TaskParams> for MemoryTasks {
    async fn update(&self, id: Id, dto: TaskParams) -> RepositoryResult<Task> {
        let mut tables = self.0.write();
        let task = tables
            .tasks
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Task::TYPE_NAME, id))?;
        task.name = dto.name;
        task.description = dto.description;
        task.duration_hours = dto.duration_hours;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }
}

impl TaskStore for MemoryTasks {}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryAssignments(Shared);

#[async_trait]
impl AssignmentStore for MemoryAssignments {
    async fn assign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<Assignment> {
        let mut tables = self.0.write();
        if !tables.consultants.contains_key(&consultant_id) {
            return Err(RepositoryError::not_found(Consultant::TYPE_NAME, consultant_id));
        }
        if !tables.tasks.contains_key(&task_id) {
            return Err(RepositoryError::not_found(Task::TYPE_NAME, task_id));
        }
        let duplicate = tables
            .assignments
            .values()
            .any(|a| a.consultant_id == consultant_id && a.task_id == task_id);
        if duplicate {
            return Err(RepositoryError::Conflict(format!(
                "Consultant {} is already assigned to task {}",
                consultant_id, task_id
            )));
        }

        let id = next(&mut tables.sequences.assignments);
        let assignment = Assignment {
            id,
            consultant_id,
            task_id,
            assigned_at: Utc::now(),
        };
        tables.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    async fn unassign(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool> {
        let mut tables = self.0.write();
        let before = tables.assignments.len();
        tables
            .assignments
            .retain(|_, a| !(a.consultant_id == consultant_id && a.task_id == task_id));
        Ok(tables.assignments.len() < before)
    }

    async fn is_assigned(&self, consultant_id: Id, task_id: Id) -> RepositoryResult<bool> {
        Ok(self
            .0
            .read()
            .assignments
            .values()
            .any(|a| a.consultant_id == consultant_id && a.task_id == task_id))
    }

    async fn consultants_for_task(&self, task_id: Id) -> RepositoryResult<Vec<Id>> {
        let mut ids: Vec<Id> = self
            .0
            .read()
            .assignments
            .values()
            .filter(|a| a.task_id == task_id)
            .map(|a| a.consultant_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

// ---------------------------------------------------------------------------
// Work entries
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MemoryWorkEntries(Shared);

#[async_trait]
impl Repository<WorkEntry, NewWorkEntry> for MemoryWorkEntries {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<WorkEntry>> {
        Ok(self.0.read().work_entries.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<WorkEntry>> {
        Ok(self.0.read().work_entries.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.0.read().work_entries.len() as i64)
    }

    async fn create(&self, dto: NewWorkEntry) -> RepositoryResult<WorkEntry> {
        let mut tables = self.0.write();
        if !tables.consultants.contains_key(&dto.consultant_id) {
            return Err(RepositoryError::not_found(Consultant::TYPE_NAME, dto.consultant_id));
        }
        if !tables.tasks.contains_key(&dto.task_id) {
            return Err(RepositoryError::not_found(Task::TYPE_NAME, dto.task_id));
        }
        let now = Utc::now();
        let id = next(&mut tables.sequences.work_entries);
        let entry = WorkEntry {
            id,
            consultant_id: dto.consultant_id,
            task_id: dto.task_id,
            work_date: dto.work_date,
            hours_worked: dto.hours_worked,
            rate_per_hour_at_time_of_work: dto.rate_per_hour_at_time_of_work,
            created_at: now,
            updated_at: now,
        };
        tables.work_entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        match self.0.write().work_entries.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found(WorkEntry::TYPE_NAME, id)),
        }
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.0.read().work_entries.contains_key(&id))
    }
}

#[async_trait]
impl WorkEntryStore for MemoryWorkEntries {
    async fn hours_on(&self, consultant_id: Id, work_date: NaiveDate) -> RepositoryResult<Decimal> {
        Ok(self
            .0
            .read()
            .work_entries
            .values()
            .filter(|e| e.consultant_id == consultant_id && e.work_date == work_date)
            .map(|e| e.hours_worked)
            .sum())
    }

    async fn find_for_consultant_between(
        &self,
        consultant_id: Id,
        range: DateRange,
    ) -> RepositoryResult<Vec<WorkEntry>> {
        let mut entries: Vec<WorkEntry> = self
            .0
            .read()
            .work_entries
            .values()
            .filter(|e| e.consultant_id == consultant_id && range.contains(e.work_date))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.work_date, e.id));
        Ok(entries)
    }
}
