//! Consultant registry

use cm_contracts::ConsultantContract;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_core::traits::{Entity, Id};
use cm_models::{Consultant, ConsultantParams, Role};

use crate::base::{validate, SharedStorage};

#[derive(Clone)]
pub struct ConsultantService {
    storage: SharedStorage,
    contract: ConsultantContract,
}

impl ConsultantService {
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            storage,
            contract: ConsultantContract,
        }
    }

    async fn ensure_role(&self, role_id: Id) -> LedgerResult<()> {
        if !self.storage.roles().exists(role_id).await? {
            return Err(LedgerError::not_found(Role::TYPE_NAME, role_id));
        }
        Ok(())
    }

    pub async fn create(&self, params: ConsultantParams) -> LedgerResult<Consultant> {
        validate(&self.contract, &params)?;
        self.ensure_role(params.consultant_role_id).await?;

        let consultant = self.storage.consultants().create(params).await?;
        tracing::info!(
            consultant_id = consultant.id,
            role_id = consultant.consultant_role_id,
            "Consultant created"
        );
        Ok(consultant)
    }

    pub async fn get(&self, id: Id) -> LedgerResult<Consultant> {
        self.storage
            .consultants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(Consultant::TYPE_NAME, id))
    }

    pub async fn list(&self) -> LedgerResult<Vec<Consultant>> {
        Ok(self.storage.consultants().find_all().await?)
    }

    /// Full replace. Switching roles never touches recorded work.
    pub async fn update(&self, id: Id, params: ConsultantParams) -> LedgerResult<Consultant> {
        validate(&self.contract, &params)?;
        if !self.storage.consultants().exists(id).await? {
            return Err(LedgerError::not_found(Consultant::TYPE_NAME, id));
        }
        self.ensure_role(params.consultant_role_id).await?;

        let consultant = self.storage.consultants().update(id, params).await?;
        tracing::info!(consultant_id = id, "Consultant updated");
        Ok(consultant)
    }

    /// Removes the consultant together with its assignments and work entries
    pub async fn delete(&self, id: Id) -> LedgerResult<()> {
        self.storage.consultants().delete(id).await?;
        tracing::info!(consultant_id = id, "Consultant deleted with its assignments and work");
        Ok(())
    }
}
