//! Task contract

use cm_core::error::ValidationErrors;
use cm_models::TaskParams;
use rust_decimal::Decimal;

use crate::base::{
    collect_derived, validate_presence, validate_scale, validate_within_storage, Contract,
    ValidationResult,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct TaskContract;

impl TaskContract {
    /// Planned duration is informational but cannot be negative
    fn validate_duration(&self, duration_hours: Decimal, errors: &mut ValidationErrors) {
        if duration_hours < Decimal::ZERO {
            errors.add("duration_hours", "must be greater than or equal to 0");
        }
        validate_scale("duration_hours", duration_hours, errors);
        validate_within_storage("duration_hours", duration_hours, errors);
    }
}

impl Contract<TaskParams> for TaskContract {
    fn validate(&self, params: &TaskParams) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_presence("name", &params.name, &mut errors);
        if !errors.has_error("name") {
            collect_derived(params, &mut errors);
        }
        self.validate_duration(params.duration_hours, &mut errors);

        errors.into_result()
    }
}
