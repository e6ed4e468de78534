//! Role registry

use cm_contracts::RoleContract;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_models::{Role, RoleParams};

use crate::base::{validate, SharedStorage};

/// Create, read, replace and delete billable roles
///
/// Rate changes only affect work recorded afterwards; existing entries keep
/// their own snapshot.
#[derive(Clone)]
pub struct RoleService {
    storage: SharedStorage,
    contract: RoleContract,
}

impl RoleService {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            contract: RoleContract,
        }
    }

    pub async fn create(&self, params: RoleParams) -> LedgerResult<Role> {
        validate(&self.contract, &params)?;
        let role = self.storage.roles().create(params).await?;
        tracing::info!(role_id = role.id, rate = %role.rate_per_hour, "Role created");
        Ok(role)
    }

    pub async fn get(&self, id: Id) -> LedgerResult<Role> {
        self.storage
            .roles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Role::TYPE_NAME, id))
    }

    pub async fn list(&self) -> LedgerResult<Vec<Role>> {
        Ok(self.storage.roles().find_all().await?)
    }

    pub async fn update(&self, id: Id, params: RoleParams) -> LedgerResult<Role> {
        validate(&self.contract, &params)?;
        let role = self.storage.roles().update(id, params).await?;
        tracing::info!(role_id = id, rate = %role.rate_per_hour, "Role updated");
        Ok(role)
    }

    /// Fails with `Conflict` while a consultant still holds the role
    pub async fn delete(&self, id: Id) -> LedgerResult<()> {
        self.storage.roles().delete(id).await.map_err(|e| {
            tracing::debug!(role_id = id, error = %e, "Role delete refused");
            LedgerError::from(e)
        })?;
        tracing::info!(role_id = id, "Role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::error::ErrorKind;
    use cm_db::{MemoryStorage, Storage};
    use cm_models::ConsultantParams;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn service() -> (Arc<MemoryStorage>, RoleService) {
        let storage = Arc::new(MemoryStorage::seeded());
        (storage.clone(), RoleService::new(storage))
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let (_, roles) = service();
        let role = roles
            .create(RoleParams::new("Principal", Decimal::new(12000, 2)))
            .await
            .unwrap();
        assert_eq!(role.id, 3);

        let updated = roles
            .update(role.id, RoleParams::new("Principal", Decimal::new(13000, 2)))
            .await
            .unwrap();
        assert_eq!(updated.rate_per_hour, Decimal::from(130));
        assert_eq!(roles.get(role.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_rate_must_be_positive() {
        let (_, roles) = service();
        let err = roles
            .create(RoleParams::new("Free", Decimal::ZERO))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(roles.list().await.unwrap().len(), 2);

        let err = roles
            .update(1, RoleParams::new("Level 1", Decimal::new(-1, 0)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_missing_role() {
        let (_, roles) = service();
        assert_eq!(roles.get(99).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            roles
                .update(99, RoleParams::new("Ghost", Decimal::ONE))
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(roles.delete(99).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_referenced_role_conflicts() {
        let (storage, roles) = service();
        storage
            .consultants()
            .create(ConsultantParams::new("Ada", "Lovelace", "ada@example.com", 1))
            .await
            .unwrap();

        let err = roles.delete(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(roles.get(1).await.is_ok());

        roles.delete(2).await.unwrap();
        assert_eq!(roles.get(2).await.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
