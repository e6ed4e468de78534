//! Payment summary

use chrono::NaiveDate;
use cm_core::result::LedgerResult;
use cm_core::traits::Id;
use cm_core::types::{checked_total, DateRange};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::consultant::Consultant;
use crate::work_entry::WorkEntry;

/// A consultant's work entries and totals over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub consultant_id: Id,
    pub consultant_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub work_entries: Vec<WorkEntry>,
}

impl PaymentSummary {
    /// Aggregate `entries`, which must already be in work-date order.
    ///
    /// Totals are summed from each entry's own hours and snapshot rate.
    pub fn tally(
        consultant: &Consultant,
        range: DateRange,
        entries: Vec<WorkEntry>,
    ) -> LedgerResult<Self> {
        let total_hours = checked_total("total_hours", entries.iter().map(|e| e.hours_worked))?;
        let amounts = entries
            .iter()
            .map(WorkEntry::total_amount)
            .collect::<LedgerResult<Vec<_>>>()?;
        let total_amount = checked_total("total_amount", amounts)?;

        Ok(Self {
            consultant_id: consultant.id,
            consultant_name: consultant.full_name(),
            start_date: range.start_date(),
            end_date: range.end_date(),
            total_hours,
            total_amount,
            work_entries: entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn consultant() -> Consultant {
        let now = Utc::now();
        Consultant {
            id: 3,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            profile_image_path: None,
            consultant_role_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry(id: Id, hours: Decimal, rate: Decimal) -> WorkEntry {
        let now = Utc::now();
        WorkEntry {
            id,
            consultant_id: 3,
            task_id: 1,
            work_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            hours_worked: hours,
            rate_per_hour_at_time_of_work: rate,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_tally_sums_per_entry_amounts() {
        let day = DateRange::day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let entries = vec![
            entry(1, Decimal::new(25, 1), Decimal::new(3333, 2)),
            entry(2, Decimal::new(15, 1), Decimal::new(7500, 2)),
        ];
        let expected = entries[0].total_amount().unwrap() + entries[1].total_amount().unwrap();

        let summary = PaymentSummary::tally(&consultant(), day, entries).unwrap();

        assert_eq!(summary.consultant_name, "Grace Hopper");
        assert_eq!(summary.total_hours, Decimal::from(4));
        // 2.5 * 33.33 + 1.5 * 75.00 = 83.325 + 112.50
        assert_eq!(summary.total_amount, Decimal::new(195825, 3));
        assert_eq!(summary.total_amount, expected);
    }

    #[test]
    fn test_tally_of_nothing_is_zero() {
        let day = DateRange::day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let summary = PaymentSummary::tally(&consultant(), day, Vec::new()).unwrap();

        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.work_entries.is_empty());
    }

    #[test]
    fn test_tally_reports_overflow() {
        let day = DateRange::day(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let huge_rate = vec![entry(1, Decimal::from(5), Decimal::MAX)];
        assert!(PaymentSummary::tally(&consultant(), day, huge_rate).is_err());

        let huge_sum = vec![
            entry(1, Decimal::ONE, Decimal::MAX),
            entry(2, Decimal::ONE, Decimal::MAX),
        ];
        let err = PaymentSummary::tally(&consultant(), day, huge_sum).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: total_amount is out of range");
    }
}
