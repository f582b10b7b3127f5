//! Command definitions
//!
//! Commands represent requested lifecycle transitions; results carry
//! what the HTTP layer reports back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Command to lend a book to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowCommand {
    pub book_id: i64,
    pub user_id: i64,
}

impl BorrowCommand {
    pub fn new(book_id: i64, user_id: i64) -> Self {
        Self { book_id, user_id }
    }
}

/// Command to return a borrowed book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnCommand {
    pub borrow_id: i64,
}

impl ReturnCommand {
    pub fn new(borrow_id: i64) -> Self {
        Self { borrow_id }
    }
}

/// Result of a successful borrow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowResult {
    pub borrow_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub due_date: DateTime<Utc>,
}

/// Result of a successful return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnResult {
    pub borrow_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub fine_incurred: Decimal,
    pub is_overdue: bool,
}
