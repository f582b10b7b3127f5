//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::role::RoleParseError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 400 Bad Request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    InvalidRole(#[from] RoleParseError),

    #[error("donated_by_id does not correspond to an existing user")]
    DonorNotFound,

    // 401 Unauthorized
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(String),

    // 403 Forbidden
    #[error("Your account is blocked. Please contact the librarian.")]
    AccountBlocked,

    #[error("Access denied. Insufficient permissions.")]
    Forbidden,

    #[error("Student has reached the maximum borrowing limit of 3 books")]
    BorrowLimitReached,

    // 404 Not Found
    #[error("Book not found or not available")]
    BookUnavailable,

    #[error("User not found or is blocked")]
    UserNotFoundOrBlocked,

    #[error("Active borrow record not found for this ID")]
    BorrowNotFound,

    // 409 Conflict
    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Book with this unique number already exists")]
    DuplicateBookNumber,

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }
            AppError::InvalidRole(e) => {
                (StatusCode::BAD_REQUEST, "invalid_role", Some(e.to_string()))
            }
            AppError::DonorNotFound => (StatusCode::BAD_REQUEST, "donor_not_found", None),

            // 401 Unauthorized
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", Some(msg.clone()))
            }

            // 403 Forbidden
            AppError::AccountBlocked => (StatusCode::FORBIDDEN, "account_blocked", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", None),
            AppError::BorrowLimitReached => {
                (StatusCode::FORBIDDEN, "borrow_limit_reached", None)
            }

            // 404 Not Found
            AppError::BookUnavailable => (StatusCode::NOT_FOUND, "book_unavailable", None),
            AppError::UserNotFoundOrBlocked => {
                (StatusCode::NOT_FOUND, "user_not_found", None)
            }
            AppError::BorrowNotFound => (StatusCode::NOT_FOUND, "borrow_not_found", None),

            // 409 Conflict
            AppError::EmailTaken => (StatusCode::CONFLICT, "email_taken", None),
            AppError::DuplicateBookNumber => {
                (StatusCode::CONFLICT, "duplicate_book_number", None)
            }

            // 500 Internal Server Error. Detail goes to the log, not the caller.
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                return generic_server_error("database_error");
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {:?}", e);
                return generic_server_error("internal_error");
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                return generic_server_error("internal_error");
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

fn generic_server_error(error_code: &str) -> Response {
    let body = ErrorResponse {
        error: "Internal server error".to_string(),
        error_code: error_code.to_string(),
        details: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
