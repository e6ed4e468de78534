//! Base contract system
//!
//! Contracts run before anything is persisted and collect every problem
//! they find into one [`ValidationErrors`].

use cm_core::error::ValidationErrors;
use cm_core::types::{max_stored_decimal, STORED_DECIMAL_SCALE};
use rust_decimal::Decimal;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Fold `validator` derive output into our error collection
pub fn collect_derived<T: validator::Validate>(entity: &T, errors: &mut ValidationErrors) {
    let Err(derived) = entity.validate() else {
        return;
    };

    for (field, field_errors) in derived.field_errors() {
        for error in field_errors {
            let message = match error.code.as_ref() {
                "email" => "is not a valid email address".to_string(),
                "length" => length_message(error),
                code => error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", code)),
            };
            errors.add(field, message);
        }
    }
}

fn length_message(error: &validator::ValidationError) -> String {
    let length = error
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .map(|s| s.chars().count() as u64);
    let max = error.params.get("max").and_then(|v| v.as_u64());
    let min = error.params.get("min").and_then(|v| v.as_u64());

    match (length, min, max) {
        (Some(len), _, Some(max)) if len > max => {
            format!("is too long (maximum is {} characters)", max)
        }
        (_, Some(min), _) => format!("is too short (minimum is {} characters)", min),
        _ => "has an invalid length".to_string(),
    }
}

/// Reject empty or whitespace-only text
pub fn validate_presence(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
}

/// Require a strictly positive decimal
pub fn validate_positive(field: &str, value: Decimal, errors: &mut ValidationErrors) {
    if value <= Decimal::ZERO {
        errors.add(field, "must be greater than 0");
    }
}

/// Reject more decimal places than the storage columns keep.
/// Trailing zeros do not count.
pub fn validate_scale(field: &str, value: Decimal, errors: &mut ValidationErrors) {
    if value.normalize().scale() > STORED_DECIMAL_SCALE {
        errors.add(
            field,
            format!("must have at most {} decimal places", STORED_DECIMAL_SCALE),
        );
    }
}

/// Reject values above what the storage columns hold
pub fn validate_within_storage(field: &str, value: Decimal, errors: &mut ValidationErrors) {
    let max = max_stored_decimal();
    if value > max {
        errors.add(field, format!("must be less than or equal to {}", max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence() {
        let mut errors = ValidationErrors::new();
        validate_presence("name", "   ", &mut errors);
        assert_eq!(errors.get("name").unwrap(), &vec!["can't be blank".to_string()]);
    }

    #[test]
    fn test_positive() {
        let mut errors = ValidationErrors::new();
        validate_positive("rate_per_hour", Decimal::new(1, 2), &mut errors);
        assert!(errors.is_empty());

        validate_positive("rate_per_hour", Decimal::ZERO, &mut errors);
        validate_positive("rate_per_hour", Decimal::new(-5, 0), &mut errors);
        assert_eq!(errors.get("rate_per_hour").unwrap().len(), 2);
    }

    #[test]
    fn test_scale() {
        let mut errors = ValidationErrors::new();
        validate_scale("hours_worked", Decimal::new(75, 1), &mut errors);
        validate_scale("hours_worked", Decimal::new(12500, 3), &mut errors);
        assert!(errors.is_empty());

        validate_scale("hours_worked", Decimal::new(1, 3), &mut errors);
        assert_eq!(
            errors.full_messages(),
            vec!["hours_worked must have at most 2 decimal places".to_string()]
        );
    }

    #[test]
    fn test_within_storage() {
        let mut errors = ValidationErrors::new();
        validate_within_storage("rate_per_hour", Decimal::new(9_999_999_999, 2), &mut errors);
        assert!(errors.is_empty());

        validate_within_storage("rate_per_hour", Decimal::from(100_000_000), &mut errors);
        assert_eq!(
            errors.full_messages(),
            vec!["rate_per_hour must be less than or equal to 99999999.99".to_string()]
        );
    }
}
