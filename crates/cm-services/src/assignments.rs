//! Assignment registry
//!
//! An assignment authorizes a consultant to log work against a task. Removing
//! it blocks new work but leaves recorded entries alone.

use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_models::{Assignment, Consultant, Task};

use crate::base::SharedStorage;

#[derive(Clone)]
pub struct AssignmentService {
    storage: SharedStorage,
}

impl AssignmentService {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    pub async fn assign(&self, consultant_id: Id, task_id: Id) -> LedgerResult<Assignment> {
        if !self.storage.consultants().exists(consultant_id).await? {
            return Err(LedgerError::not_found(Consultant::TYPE_NAME, consultant_id));
        }
        if !self.storage.tasks().exists(task_id).await? {
            return Err(LedgerError::not_found(Task::TYPE_NAME, task_id));
        }

        let assignment = self
            .storage
            .assignments()
            .assign(consultant_id, task_id)
            .await?;
        tracing::info!(consultant_id, task_id, "Consultant assigned to task");
        Ok(assignment)
    }

    pub async fn unassign(&self, consultant_id: Id, task_id: Id) -> LedgerResult<()> {
        let removed = self
            .storage
            .assignments()
            .unassign(consultant_id, task_id)
            .await?;
        if !removed {
            return Err(LedgerError::NotFound {
                entity: "Assignment",
                field: "consultant_id/task_id",
                value: format!("{}/{}", consultant_id, task_id),
            });
        }
        tracing::info!(consultant_id, task_id, "Consultant unassigned from task");
        Ok(())
    }

    pub async fn is_assigned(&self, consultant_id: Id, task_id: Id) -> LedgerResult<bool> {
        Ok(self
            .storage
            .assignments()
            .is_assigned(consultant_id, task_id)
            .await?)
    }

    pub async fn consultants_for_task(&self, task_id: Id) -> LedgerResult<Vec<Id>> {
        Ok(self.storage.assignments().consultants_for_task(task_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::error::ErrorKind;
    use cm_db::{MemoryStorage, Storage};
    use cm_models::{ConsultantParams, TaskParams};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    async fn setup() -> (AssignmentService, Id, Id) {
        let storage = Arc::new(MemoryStorage::seeded());
        let consultant = storage
            .consultants()
            .create(ConsultantParams::new("Grace", "Hopper", "grace@example.com", 2))
            .await
            .unwrap();
        let task = storage
            .tasks()
            .create(TaskParams::new("Compiler", Decimal::from(40)))
            .await
            .unwrap();
        (AssignmentService::new(storage), consultant.id, task.id)
    }

    #[tokio::test]
    async fn test_assign_and_unassign() {
        let (assignments, consultant_id, task_id) = setup().await;
        assert!(!assignments.is_assigned(consultant_id, task_id).await.unwrap());

        let assignment = assignments.assign(consultant_id, task_id).await.unwrap();
        assert_eq!(assignment.consultant_id, consultant_id);
        assert!(assignments.is_assigned(consultant_id, task_id).await.unwrap());
        assert_eq!(
            assignments.consultants_for_task(task_id).await.unwrap(),
            vec![consultant_id]
        );

        assignments.unassign(consultant_id, task_id).await.unwrap();
        assert!(!assignments.is_assigned(consultant_id, task_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_assignment_conflicts() {
        let (assignments, consultant_id, task_id) = setup().await;
        assignments.assign(consultant_id, task_id).await.unwrap();
        let err = assignments.assign(consultant_id, task_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_missing_references() {
        let (assignments, consultant_id, task_id) = setup().await;
        let err = assignments.assign(99, task_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Consultant with id=99 not found");
        let err = assignments.assign(consultant_id, 99).await.unwrap_err();
        assert_eq!(err.to_string(), "Task with id=99 not found");

        let err = assignments.unassign(consultant_id, task_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
