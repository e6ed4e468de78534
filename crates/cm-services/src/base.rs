//! Shared service plumbing

use std::sync::Arc;

use cm_contracts::base::Contract;
use cm_core::error::LedgerError;
use cm_core::result::LedgerResult;
use cm_db::Storage;

/// Shared handle to the storage backend
pub type SharedStorage = Arc<dyn Storage>;

/// Run a contract, turning its failures into `InvalidArgument`
pub fn validate<T, C: Contract<T>>(contract: &C, entity: &T) -> LedgerResult<()> {
    contract.validate(entity).map_err(|errors| {
        tracing::debug!(errors = %errors, "Contract rejected input");
        LedgerError::Validation(errors)
    })
}
