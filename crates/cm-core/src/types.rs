//! Common types used throughout the ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, ValidationErrors};
use crate::result::LedgerResult;

/// Maximum hours a consultant may log on one calendar date
pub const DEFAULT_DAILY_HOUR_CAP: u32 = 12;

/// Decimal places kept by the `NUMERIC(10, 2)` money and hours columns
pub const STORED_DECIMAL_SCALE: u32 = 2;

/// Largest value a `NUMERIC(10, 2)` column holds (99999999.99)
pub fn max_stored_decimal() -> Decimal {
    Decimal::new(9_999_999_999, STORED_DECIMAL_SCALE)
}

/// Whether `value` survives a round trip through a `NUMERIC(10, 2)` column
/// without rounding or overflow
pub fn is_storable(value: Decimal) -> bool {
    value.normalize().scale() <= STORED_DECIMAL_SCALE && value.abs() <= max_stored_decimal()
}

fn out_of_range(field: &str) -> LedgerError {
    LedgerError::invalid(field, "is out of range")
}

/// Billed amount for a number of hours at a given hourly rate.
///
/// Exact decimal product; callers never round intermediate values.
pub fn billed_amount(hours: Decimal, rate_per_hour: Decimal) -> LedgerResult<Decimal> {
    hours
        .checked_mul(rate_per_hour)
        .ok_or_else(|| out_of_range("total_amount"))
}

/// Overflow-checked sum of decimals
pub fn checked_total(
    field: &str,
    values: impl IntoIterator<Item = Decimal>,
) -> LedgerResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).ok_or_else(|| out_of_range(field))
    })
}

/// Inclusive calendar-date range (`start <= end`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting inverted bounds
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> LedgerResult<Self> {
        if start_date > end_date {
            let mut errors = ValidationErrors::new();
            errors.add(
                "start_date",
                format!("must be on or before end date ({})", end_date),
            );
            return Err(LedgerError::Validation(errors));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Single-day range
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
        assert_eq!(range.duration_days(), 31);
    }

    #[test]
    fn test_inverted_range_is_invalid_argument() {
        let err = DateRange::new(date(2025, 2, 1), date(2025, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::day(date(2025, 1, 1));
        assert_eq!(range.start_date(), range.end_date());
        assert_eq!(range.duration_days(), 1);
    }

    #[test]
    fn test_billed_amount_is_exact() {
        let hours = Decimal::new(75, 1); // 7.5
        let rate = Decimal::new(3333, 2); // 33.33
        assert_eq!(billed_amount(hours, rate).unwrap(), Decimal::new(249975, 3));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let err = billed_amount(Decimal::MAX, Decimal::from(2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "Validation failed: total_amount is out of range");

        let err = checked_total("total_hours", [Decimal::MAX, Decimal::ONE]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            checked_total("total_hours", [Decimal::ONE, Decimal::new(5, 1)]).unwrap(),
            Decimal::new(15, 1)
        );
    }

    #[test]
    fn test_storable_values() {
        assert!(is_storable(Decimal::new(3333, 2)));
        assert!(is_storable(Decimal::new(15000, 3))); // 15.000 normalizes to 15
        assert!(is_storable(max_stored_decimal()));
        assert!(!is_storable(Decimal::new(33335, 3)));
        assert!(!is_storable(Decimal::new(1, 3)));
        assert!(!is_storable(Decimal::new(10_000_000_000, 2)));
        assert!(!is_storable(Decimal::MAX));
    }
}
