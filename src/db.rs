//! Database module
//!
//! Schema setup for the three entity tables. Runs at startup, so a
//! fresh database is usable without an external migration step.

use sqlx::PgPool;

/// Simple connectivity check.
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the users, books, and borrows tables if they do not exist.
///
/// Every table carries created_at/updated_at/deleted_at audit columns.
/// The partial unique index on open borrows backs the "at most one open
/// borrow per book" invariant at the storage layer.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            BIGSERIAL PRIMARY KEY,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role          TEXT NOT NULL,
            penalty       NUMERIC NOT NULL DEFAULT 0,
            blocked       BOOLEAN NOT NULL DEFAULT FALSE,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at    TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id            BIGSERIAL PRIMARY KEY,
            title         TEXT NOT NULL,
            author        TEXT NOT NULL,
            number        TEXT NOT NULL UNIQUE,
            genre         TEXT NOT NULL,
            donated_by_id BIGINT REFERENCES users(id),
            available     BOOLEAN NOT NULL DEFAULT TRUE,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at    TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS borrows (
            id          BIGSERIAL PRIMARY KEY,
            book_id     BIGINT NOT NULL REFERENCES books(id),
            user_id     BIGINT NOT NULL REFERENCES users(id),
            borrow_date TIMESTAMPTZ NOT NULL,
            due_date    TIMESTAMPTZ NOT NULL,
            return_date TIMESTAMPTZ,
            returned    BOOLEAN NOT NULL DEFAULT FALSE,
            fine_amount NUMERIC NOT NULL DEFAULT 0,
            fine_paid   BOOLEAN NOT NULL DEFAULT FALSE,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at  TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_borrows_open_book
            ON borrows (book_id) WHERE returned = FALSE
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_borrows_open_user
            ON borrows (user_id) WHERE returned = FALSE
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema verified: users, books, borrows");
    Ok(())
}
