//! Unit tests for the borrowing state machine's pure parts.
//!
//! The transactional paths are exercised against a real database in
//! tests/integration_api.rs.

#[cfg(test)]
mod tests {
    use crate::domain::loan::{self, STUDENT_BORROW_LIMIT};
    use crate::handlers::{BorrowCommand, ReturnCommand};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn borrow_command_carries_both_ids() {
        let cmd = BorrowCommand::new(7, 42);
        assert_eq!(cmd.book_id, 7);
        assert_eq!(cmd.user_id, 42);
    }

    #[test]
    fn return_command_carries_borrow_id() {
        let cmd = ReturnCommand::new(99);
        assert_eq!(cmd.borrow_id, 99);
    }

    #[test]
    fn student_cap_is_three() {
        assert_eq!(STUDENT_BORROW_LIMIT, 3);
    }

    #[test]
    fn loan_runs_a_week_and_fines_accrue_daily() {
        let borrowed = Utc::now();
        let due = loan::due_date(borrowed);
        assert_eq!(due - borrowed, Duration::days(7));

        // Three days and one minute late: four overdue days.
        let returned = due + Duration::days(3) + Duration::minutes(1);
        assert_eq!(loan::fine_amount(due, returned), dec!(4));
    }
}
