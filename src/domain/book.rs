//! Book entity

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A catalog entry. `available` is true iff no open borrow references
/// this book; only the borrowing state machine toggles it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Unique external catalog number.
    pub number: String,
    pub genre: String,
    /// Donor user, when the book entered the catalog via donation.
    pub donated_by_id: Option<i64>,
    pub available: bool,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}
