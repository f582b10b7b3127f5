//! Borrow repository

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use crate::domain::Borrow;
use crate::error::AppResult;

const BORROW_COLUMNS: &str = "id, book_id, user_id, borrow_date, due_date, return_date, \
     returned, fine_amount, fine_paid, created_at, updated_at, deleted_at";

/// Repository for borrow rows.
///
/// Every method runs inside a caller-owned transaction; borrow records
/// are only ever touched by the state machine's transactional
/// operations.
#[derive(Debug, Clone, Default)]
pub struct BorrowRepository;

impl BorrowRepository {
    pub fn new() -> Self {
        Self
    }

    /// Create an open borrow record.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: i64,
        user_id: i64,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Borrow> {
        let query = format!(
            r#"
            INSERT INTO borrows (book_id, user_id, borrow_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {BORROW_COLUMNS}
            "#
        );

        let borrow = sqlx::query_as::<_, Borrow>(&query)
            .bind(book_id)
            .bind(user_id)
            .bind(borrow_date)
            .bind(due_date)
            .fetch_one(&mut **tx)
            .await?;
        Ok(borrow)
    }

    /// Number of open borrows held by a user.
    pub async fn count_open_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrows WHERE user_id = $1 AND returned = FALSE",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(count)
    }

    /// Fetch the open borrow with this id, locking the row for the
    /// remainder of the transaction.
    pub async fn find_open_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> AppResult<Option<Borrow>> {
        let query = format!(
            r#"
            SELECT {BORROW_COLUMNS} FROM borrows
            WHERE id = $1 AND returned = FALSE
            FOR UPDATE
            "#
        );

        let borrow = sqlx::query_as::<_, Borrow>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(borrow)
    }

    /// Close an open borrow, recording the return timestamp and fine.
    ///
    /// Conditional on `returned = FALSE`; returns false when zero rows
    /// were affected, meaning a concurrent return already closed it.
    pub async fn mark_returned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        return_date: DateTime<Utc>,
        fine_amount: Decimal,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE borrows
            SET returned = TRUE, return_date = $1, fine_amount = $2, updated_at = NOW()
            WHERE id = $3 AND returned = FALSE
            "#,
        )
        .bind(return_date)
        .bind(fine_amount)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
