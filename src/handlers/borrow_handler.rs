//! Borrow Handler
//!
//! Lends an available book to an eligible user. The availability flip,
//! eligibility checks, and borrow-record creation commit atomically;
//! the conditional availability update is the guard that makes exactly
//! one of two concurrent borrows for the same book succeed.

use chrono::Utc;
use sqlx::PgPool;

use crate::domain::loan::{self, STUDENT_BORROW_LIMIT};
use crate::domain::Role;
use crate::error::AppError;
use crate::repository::{BookRepository, BorrowRepository, UserRepository};

use super::{BorrowCommand, BorrowResult};

/// Handler for the borrow transition.
pub struct BorrowHandler {
    users: UserRepository,
    books: BookRepository,
    borrows: BorrowRepository,
    pool: PgPool,
}

impl BorrowHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            books: BookRepository::new(pool.clone()),
            borrows: BorrowRepository::new(),
            pool,
        }
    }

    /// Execute the borrow command.
    pub async fn execute(&self, command: BorrowCommand) -> Result<BorrowResult, AppError> {
        let mut tx = self.pool.begin().await?;

        // The user row is locked, so a student firing parallel borrow
        // requests cannot slip past the open-borrow cap.
        let user = self
            .users
            .find_active_for_update(&mut tx, command.user_id)
            .await?
            .ok_or(AppError::UserNotFoundOrBlocked)?;

        if user.role == Role::Student {
            let open = self.borrows.count_open_by_user(&mut tx, command.user_id).await?;
            if open >= STUDENT_BORROW_LIMIT {
                return Err(AppError::BorrowLimitReached);
            }
        }

        // Zero rows affected: missing, deleted, or already on loan.
        if !self.books.mark_unavailable(&mut tx, command.book_id).await? {
            return Err(AppError::BookUnavailable);
        }

        let borrow_date = Utc::now();
        let due_date = loan::due_date(borrow_date);

        let borrow = self
            .borrows
            .insert(&mut tx, command.book_id, command.user_id, borrow_date, due_date)
            .await?;

        tx.commit().await?;

        tracing::info!(
            borrow_id = borrow.id,
            book_id = borrow.book_id,
            user_id = borrow.user_id,
            due_date = %borrow.due_date,
            "Book borrowed"
        );

        Ok(BorrowResult {
            borrow_id: borrow.id,
            book_id: borrow.book_id,
            user_id: borrow.user_id,
            due_date: borrow.due_date,
        })
    }
}
