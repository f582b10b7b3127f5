//! Persistence gateway
//!
//! Per-entity repositories over the connection pool. Methods that must
//! run inside a caller-owned transaction take the transaction
//! explicitly; conditional updates report whether a row was actually
//! affected so callers can treat a zero-row update as a lost race,
//! never a silent success.

mod book;
mod borrow;
mod user;

pub use book::{BookRepository, NewBook};
pub use borrow::BorrowRepository;
pub use user::UserRepository;

/// True when the error is a PostgreSQL unique-constraint violation.
///
/// Uniqueness races (duplicate email, duplicate catalog number) are
/// conflicts, not system faults.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
