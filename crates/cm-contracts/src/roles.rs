//! Role contract

use cm_core::error::ValidationErrors;
use cm_models::RoleParams;

use crate::base::{
    collect_derived, validate_positive, validate_presence, validate_scale,
    validate_within_storage, Contract, ValidationResult,
};

/// Validates role attributes on create and replace
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleContract;

impl Contract<RoleParams> for RoleContract {
    fn validate(&self, params: &RoleParams) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_presence("name", &params.name, &mut errors);
        if !errors.has_error("name") {
            collect_derived(params, &mut errors);
        }
        validate_positive("rate_per_hour", params.rate_per_hour, &mut errors);
        validate_scale("rate_per_hour", params.rate_per_hour, &mut errors);
        validate_within_storage("rate_per_hour", params.rate_per_hour, &mut errors);

        errors.into_result()
    }
}
