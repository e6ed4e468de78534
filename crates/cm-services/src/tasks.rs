//! Task registry

use cm_contracts::TaskContract;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_models::{Task, TaskParams};

use crate::base::{validate, SharedStorage};

#[derive(Clone)]
pub struct TaskService {
    storage: SharedStorage,
    contract: TaskContract,
}

impl TaskService {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            contract: TaskContract,
        }
    }

    pub async fn create(&self, params: TaskParams) -> LedgerResult<Task> {
        validate(&self.contract, &params)?;
        let task = self.storage.tasks().create(params).await?;
        tracing::info!(task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn get(&self, id: Id) -> LedgerResult<Task> {
        self.storage
            .tasks()
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Task::TYPE_NAME, id))
    }

    pub async fn list(&self) -> LedgerResult<Vec<Task>> {
        Ok(self.storage.tasks().find_all().await?)
    }

    pub async fn update(&self, id: Id, params: TaskParams) -> LedgerResult<Task> {
        validate(&self.contract, &params)?;
        let task = self.storage.tasks().update(id, params).await?;
        tracing::info!(task_id = id, "Task updated");
        Ok(task)
    }

    /// Removes the task together with its assignments and work entries
    pub async fn delete(&self, id: Id) -> LedgerResult<()> {
        self.storage.tasks().delete(id).await?;
        tracing::info!(task_id = id, "Task deleted with its assignments and work");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::error::ErrorKind;
    use cm_db::MemoryStorage;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_task_lifecycle() {
        let tasks = TaskService::new(Arc::new(MemoryStorage::new()));
        let task = tasks
            .create(TaskParams::new("Discovery", Decimal::from(16)).with_description("Kickoff"))
            .await
            .unwrap();
        assert_eq!(task.description.as_deref(), Some("Kickoff"));

        let renamed = tasks
            .update(task.id, TaskParams::new("Discovery phase", Decimal::from(20)))
            .await
            .unwrap();
        assert_eq!(renamed.description, None);
        assert_eq!(tasks.list().await.unwrap(), vec![renamed]);

        tasks.delete(task.id).await.unwrap();
        assert_eq!(tasks.get(task.id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let tasks = TaskService::new(Arc::new(MemoryStorage::new()));
        let err = tasks.create(TaskParams::new("  ", Decimal::ZERO)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(tasks.list().await.unwrap().is_empty());
    }
}
