//! Work entry contract
//!
//! Only the shape of a submission is checked here. Existence, assignment and
//! the daily cap need storage and are enforced by the work ledger. The cap
//! also bounds hours from above, so no upper limit is checked here.

use cm_core::error::ValidationErrors;
use cm_models::WorkEntryParams;

use crate::base::{validate_positive, validate_scale, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct WorkEntryContract;

impl Contract<WorkEntryParams> for WorkEntryContract {
    fn validate(&self, params: &WorkEntryParams) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        validate_positive("hours_worked", params.hours_worked, &mut errors);
        validate_scale("hours_worked", params.hours_worked, &mut errors);
        errors.into_result()
    }
}
