//! Postgres-backed storage bundle

use async_trait::async_trait;

use crate::assignments::AssignmentRepository;
use crate::consultants::ConsultantRepository;
use crate::pool::Database;
use crate::repository::RepositoryResult;
use crate::roles::RoleRepository;
use crate::store::{
    AssignmentStore, ConsultantStore, RoleStore, Storage, TaskStore, WorkEntryStore,
};
use crate::tasks::TaskRepository;
use crate::work_entries::WorkEntryRepository;

/// All repositories sharing one connection pool
pub struct PgStorage {
    db: Database,
    roles: RoleRepository,
    consultants: ConsultantRepository,
    tasks: TaskRepository,
    assignments: AssignmentRepository,
    work_entries: WorkEntryRepository,
}

impl PgStorage {
    pub fn new(db: Database) -> Self {
        let pool = db.pool().clone();
        Self {
            roles: RoleRepository::new(pool.clone()),
            consultants: ConsultantRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool.clone()),
            work_entries: WorkEntryRepository::new(pool),
            db,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Storage for PgStorage {
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
        "postgres"
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
