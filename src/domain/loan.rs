//! Loan arithmetic
//!
//! The fixed loan period, the per-role borrowing cap, and the overdue
//! fine computation. Fines are charged per started overdue day: any
//! fraction of a day past the due timestamp counts as a full day.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Fixed loan period from borrow to due timestamp.
pub const LOAN_PERIOD_DAYS: i64 = 7;

/// Maximum simultaneous open borrows for the student role.
/// Other roles are uncapped.
pub const STUDENT_BORROW_LIMIT: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Fine rate: one currency unit per overdue day.
pub fn fine_per_day() -> Decimal {
    Decimal::ONE
}

/// Due timestamp for a loan starting at `borrowed_at`.
pub fn due_date(borrowed_at: DateTime<Utc>) -> DateTime<Utc> {
    borrowed_at + Duration::days(LOAN_PERIOD_DAYS)
}

/// Number of overdue days, rounded up to whole days.
///
/// A return on or before the due timestamp is not overdue.
pub fn overdue_days(due: DateTime<Utc>, returned_at: DateTime<Utc>) -> i64 {
    if returned_at <= due {
        return 0;
    }
    let overdue_millis = (returned_at - due).num_milliseconds();
    // Ceiling division; overdue_millis is strictly positive here.
    (overdue_millis - 1) / MILLIS_PER_DAY + 1
}

/// Fine owed for a return at `returned_at` against a loan due at `due`.
pub fn fine_amount(due: DateTime<Utc>, returned_at: DateTime<Utc>) -> Decimal {
    Decimal::from(overdue_days(due, returned_at)) * fine_per_day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn due() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn return_before_due_is_free() {
        let returned = due() - Duration::days(2);
        assert_eq!(overdue_days(due(), returned), 0);
        assert_eq!(fine_amount(due(), returned), Decimal::ZERO);
    }

    #[test]
    fn return_exactly_at_due_is_free() {
        assert_eq!(fine_amount(due(), due()), Decimal::ZERO);
    }

    #[test]
    fn one_hour_late_rounds_up_to_one_day() {
        let returned = due() + Duration::hours(1);
        assert_eq!(overdue_days(due(), returned), 1);
        assert_eq!(fine_amount(due(), returned), dec!(1));
    }

    #[test]
    fn forty_seven_hours_late_rounds_up_to_two_days() {
        let returned = due() + Duration::hours(47);
        assert_eq!(overdue_days(due(), returned), 2);
        assert_eq!(fine_amount(due(), returned), dec!(2));
    }

    #[test]
    fn exactly_forty_eight_hours_late_is_two_days() {
        let returned = due() + Duration::hours(48);
        assert_eq!(overdue_days(due(), returned), 2);
        assert_eq!(fine_amount(due(), returned), dec!(2));
    }

    #[test]
    fn one_second_late_still_charges_a_day() {
        let returned = due() + Duration::seconds(1);
        assert_eq!(overdue_days(due(), returned), 1);
    }

    #[test]
    fn due_date_is_seven_days_out() {
        let borrowed: DateTime<Utc> = "2026-03-01T09:30:00Z".parse().unwrap();
        let expected: DateTime<Utc> = "2026-03-08T09:30:00Z".parse().unwrap();
        assert_eq!(due_date(borrowed), expected);
    }
}
