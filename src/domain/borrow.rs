//! Borrow entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One borrow transaction. A record with `returned == false` is the
/// sole open borrow for its book; it is mutated exactly once, at
/// return time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Borrow {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub returned: bool,
    pub fine_amount: Decimal,
    pub fine_paid: bool,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}
