//! User repository

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Role, User};
use crate::error::{AppError, AppResult};

use super::is_unique_violation;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, penalty, blocked, created_at, updated_at, deleted_at";

/// Repository for user rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A duplicate email surfaces as a conflict.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> AppResult<User> {
        let query = format!(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::EmailTaken
                } else {
                    AppError::Database(e)
                }
            })
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Fetch a non-blocked user inside a transaction, locking the row.
    ///
    /// The row lock serializes concurrent borrow attempts by the same
    /// user, so the per-role open-borrow count cannot be raced past its
    /// cap.
    pub async fn find_active_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> AppResult<Option<User>> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE id = $1 AND blocked = FALSE AND deleted_at IS NULL
            FOR UPDATE
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(user)
    }

    /// Accrue a fine onto the user's running penalty.
    ///
    /// The increment happens in the database, so concurrent returns by
    /// the same user cannot lose updates.
    pub async fn add_penalty(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
        amount: Decimal,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET penalty = penalty + $1, updated_at = NOW()
            WHERE id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(amount)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
