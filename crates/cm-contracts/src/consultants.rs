//! Consultant contract
//!
//! Role existence is a lookup, not a format rule, and is checked by the
//! consultant registry.

use cm_core::error::ValidationErrors;
use cm_models::ConsultantParams;

use crate::base::{collect_derived, validate_presence, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsultantContract;

impl Contract<ConsultantParams> for ConsultantContract {
    fn validate(&self, params: &ConsultantParams) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        validate_presence("first_name", &params.first_name, &mut errors);
        validate_presence("last_name", &params.last_name, &mut errors);
        validate_presence("email", &params.email, &mut errors);

        let mut derived = ValidationErrors::new();
        collect_derived(params, &mut derived);
        for (field, messages) in derived.errors {
            // blank fields already carry a clearer message
            if errors.has_error(&field) {
                continue;
            }
            for message in messages {
                errors.add(field.clone(), message);
            }
        }

        errors.into_result()
    }
}
