//! Common test utilities

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use library_api::auth::TokenIssuer;
use library_api::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Connect to the test database, create the schema, and truncate all
/// tables for a fresh state.
///
/// Tests sharing this helper assume serial execution
/// (`cargo test -- --ignored --test-threads=1`).
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    library_api::db::ensure_schema(&pool)
        .await
        .expect("Failed to create schema");

    sqlx::query("TRUNCATE TABLE borrows, books, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}

/// Application state wired with the test signing secret.
pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(pool, TokenIssuer::new(TEST_JWT_SECRET))
}
