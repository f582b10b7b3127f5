//! Return Handler
//!
//! Closes an open borrow: computes the overdue fine, marks the record
//! returned, restores the book's availability, and accrues the fine
//! onto the user's penalty. All three mutations commit in one
//! transaction; none can be observed without the others.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::loan;
use crate::error::AppError;
use crate::repository::{BookRepository, BorrowRepository, UserRepository};

use super::{ReturnCommand, ReturnResult};

/// Handler for the return transition.
pub struct ReturnHandler {
    users: UserRepository,
    books: BookRepository,
    borrows: BorrowRepository,
    pool: PgPool,
}

impl ReturnHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            books: BookRepository::new(pool.clone()),
            borrows: BorrowRepository::new(),
            pool,
        }
    }

    /// Execute the return command.
    pub async fn execute(&self, command: ReturnCommand) -> Result<ReturnResult, AppError> {
        let mut tx = self.pool.begin().await?;

        let borrow = self
            .borrows
            .find_open_for_update(&mut tx, command.borrow_id)
            .await?
            .ok_or(AppError::BorrowNotFound)?;

        let return_date = Utc::now();
        let fine = loan::fine_amount(borrow.due_date, return_date);

        // The row is locked above, but the conditional update still
        // guards against a return that lost the race.
        let closed = self
            .borrows
            .mark_returned(&mut tx, borrow.id, return_date, fine)
            .await?;
        if !closed {
            return Err(AppError::BorrowNotFound);
        }

        self.books.mark_available(&mut tx, borrow.book_id).await?;

        if fine > Decimal::ZERO {
            self.users.add_penalty(&mut tx, borrow.user_id, fine).await?;
        }

        tx.commit().await?;

        tracing::info!(
            borrow_id = borrow.id,
            book_id = borrow.book_id,
            user_id = borrow.user_id,
            fine = %fine,
            "Book returned"
        );

        Ok(ReturnResult {
            borrow_id: borrow.id,
            book_id: borrow.book_id,
            user_id: borrow.user_id,
            fine_incurred: fine,
            is_overdue: fine > Decimal::ZERO,
        })
    }
}
