//! library_api Library
//!
//! Re-exports modules for integration testing and external use.

use sqlx::PgPool;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod repository;

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state.
///
/// Constructed once at startup and injected into every component that
/// needs the database or the token issuer; nothing reaches for ambient
/// globals.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: auth::TokenIssuer,
}

impl AppState {
    pub fn new(pool: PgPool, tokens: auth::TokenIssuer) -> Self {
        Self { pool, tokens }
    }
}
