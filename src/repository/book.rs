//! Book repository

use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::Book;
use crate::error::{AppError, AppResult};

use super::is_unique_violation;

const BOOK_COLUMNS: &str =
    "id, title, author, number, genre, donated_by_id, available, created_at, updated_at, deleted_at";

/// Fields for a new catalog entry.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub number: String,
    pub genre: String,
    pub donated_by_id: Option<i64>,
}

/// Repository for book rows.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new book, available by default. A duplicate catalog
    /// number surfaces as a conflict.
    pub async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (title, author, number, genre, donated_by_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOK_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(&new_book.title)
            .bind(&new_book.author)
            .bind(&new_book.number)
            .bind(&new_book.genre)
            .bind(new_book.donated_by_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateBookNumber
                } else {
                    AppError::Database(e)
                }
            })
    }

    pub async fn find_by_number(&self, number: &str) -> AppResult<Option<Book>> {
        let query =
            format!("SELECT {BOOK_COLUMNS} FROM books WHERE number = $1 AND deleted_at IS NULL");

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1 AND deleted_at IS NULL");

        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// All non-deleted books, title ascending. An empty catalog is a
    /// valid result, not an error.
    pub async fn list_by_title(&self) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE deleted_at IS NULL ORDER BY title ASC"
        );

        let books = sqlx::query_as::<_, Book>(&query).fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Flip an available book to on-loan.
    ///
    /// Conditional on the book still being available; returns false when
    /// zero rows were affected, meaning the book is missing, deleted, or
    /// already on loan (including a concurrent borrow winning the race).
    pub async fn mark_unavailable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available = FALSE, updated_at = NOW()
            WHERE id = $1 AND available = TRUE AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Restore a returned book to available.
    pub async fn mark_available(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET available = TRUE, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
