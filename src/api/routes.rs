//! API Routes
//!
//! HTTP endpoint definitions. Request bodies use defaulted fields with
//! explicit validation so a missing field is a 400 with a descriptive
//! message rather than a deserialization rejection.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::domain::{Book, Role};
use crate::error::AppError;
use crate::handlers::{BorrowCommand, BorrowHandler, ReturnCommand, ReturnHandler};
use crate::repository::{BookRepository, NewBook, UserRepository};
use crate::AppState;

use super::middleware::{authenticate, CurrentUser};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub message: String,
    pub token: String,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub genre: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DonateBookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub donated_by_id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub message: String,
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowBookRequest {
    #[serde(default)]
    pub book_id: i64,
    #[serde(default)]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct BorrowBookResponse {
    pub message: String,
    pub borrow_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReturnBookResponse {
    pub message: String,
    pub borrow_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub fine_incurred: Decimal,
    pub is_overdue: bool,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router. Everything except signup/signin sits behind
/// the bearer-token middleware.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in));

    let protected = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/donate", post(donate_book))
        .route("/books/borrow", post(borrow_book))
        .route("/books/return/:id", post(return_book))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}

// =========================================================================
// POST /api/signup
// =========================================================================

/// Register a new user
async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    if request.name.is_empty()
        || request.email.is_empty()
        || request.password.is_empty()
        || request.role.is_empty()
    {
        return Err(AppError::InvalidRequest(
            "Name, Email, Password, and Role are required".to_string(),
        ));
    }

    let role: Role = request.role.parse()?;
    let password_hash = password::hash(&request.password)?;

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .create(&request.name, &request.email, &password_hash, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
            },
        }),
    ))
}

// =========================================================================
// POST /api/signin
// =========================================================================

/// Authenticate and issue a session token.
///
/// An unknown email and a wrong password produce the same response, so
/// the endpoint never reveals whether an email is registered.
async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Email and password are required".to_string(),
        ));
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_email(&request.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if user.blocked {
        return Err(AppError::AccountBlocked);
    }

    if !password::verify(&request.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| AppError::Internal(format!("Token signing failed: {e}")))?;

    Ok(Json(SignInResponse {
        message: "Login successful".to_string(),
        token,
        user_id: user.id,
        user_name: user.name,
        user_email: user.email,
        user_role: user.role,
    }))
}

// =========================================================================
// GET /api/books
// =========================================================================

/// List all books, title ascending. An empty catalog is a 200 with an
/// empty array.
async fn list_books(State(state): State<AppState>) -> Result<Json<BookListResponse>, AppError> {
    let books = BookRepository::new(state.pool.clone()).list_by_title().await?;

    let message = if books.is_empty() {
        "No books found".to_string()
    } else {
        "Books retrieved successfully".to_string()
    };

    Ok(Json(BookListResponse { message, books }))
}

// =========================================================================
// POST /api/books
// =========================================================================

/// Create a book (librarian only)
async fn create_book(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    current.authorize(&[Role::Librarian])?;

    if request.title.is_empty()
        || request.author.is_empty()
        || request.number.is_empty()
        || request.genre.is_empty()
    {
        return Err(AppError::InvalidRequest(
            "Title, Author, Number, and Genre are required".to_string(),
        ));
    }

    let books = BookRepository::new(state.pool.clone());

    if books.find_by_number(&request.number).await?.is_some() {
        return Err(AppError::DuplicateBookNumber);
    }

    let book = books
        .create(NewBook {
            title: request.title,
            author: request.author,
            number: request.number,
            genre: request.genre,
            donated_by_id: None,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book created successfully".to_string(),
            book,
        }),
    ))
}

// =========================================================================
// POST /api/books/donate
// =========================================================================

/// Donate a book. Any authenticated user may donate; the donor must be
/// an existing user.
async fn donate_book(
    State(state): State<AppState>,
    Json(request): Json<DonateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    if request.title.is_empty()
        || request.author.is_empty()
        || request.number.is_empty()
        || request.genre.is_empty()
        || request.donated_by_id == 0
    {
        return Err(AppError::InvalidRequest(
            "Title, Author, Number, Genre, and DonatedByID are required for donation".to_string(),
        ));
    }

    let users = UserRepository::new(state.pool.clone());
    if users.find_by_id(request.donated_by_id).await?.is_none() {
        return Err(AppError::DonorNotFound);
    }

    let books = BookRepository::new(state.pool.clone());

    if books.find_by_number(&request.number).await?.is_some() {
        return Err(AppError::DuplicateBookNumber);
    }

    let book = books
        .create(NewBook {
            title: request.title,
            author: request.author,
            number: request.number,
            genre: request.genre,
            donated_by_id: Some(request.donated_by_id),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book donated successfully".to_string(),
            book,
        }),
    ))
}

// =========================================================================
// POST /api/books/borrow
// =========================================================================

/// Borrow a book
async fn borrow_book(
    State(state): State<AppState>,
    Json(request): Json<BorrowBookRequest>,
) -> Result<(StatusCode, Json<BorrowBookResponse>), AppError> {
    if request.book_id == 0 || request.user_id == 0 {
        return Err(AppError::InvalidRequest(
            "BookID and UserID are required".to_string(),
        ));
    }

    let handler = BorrowHandler::new(state.pool.clone());
    let result = handler
        .execute(BorrowCommand::new(request.book_id, request.user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowBookResponse {
            message: "Book borrowed successfully".to_string(),
            borrow_id: result.borrow_id,
            book_id: result.book_id,
            user_id: result.user_id,
            due_date: result.due_date,
        }),
    ))
}

// =========================================================================
// POST /api/books/return/:id
// =========================================================================

/// Return a borrowed book
async fn return_book(
    State(state): State<AppState>,
    Path(borrow_id): Path<i64>,
) -> Result<Json<ReturnBookResponse>, AppError> {
    if borrow_id <= 0 {
        return Err(AppError::InvalidRequest("Invalid borrow ID".to_string()));
    }

    let handler = ReturnHandler::new(state.pool.clone());
    let result = handler.execute(ReturnCommand::new(borrow_id)).await?;

    Ok(Json(ReturnBookResponse {
        message: "Book returned successfully".to_string(),
        borrow_id: result.borrow_id,
        book_id: result.book_id,
        user_id: result.user_id,
        fine_incurred: result.fine_incurred,
        is_overdue: result.is_overdue,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_missing_fields_default_to_empty() {
        let request: SignUpRequest = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(request.name, "Alice");
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
        assert!(request.role.is_empty());
    }

    #[test]
    fn signup_request_deserializes_fully() {
        let json = r#"{
            "name": "Alice",
            "email": "alice@example.com",
            "password": "hunter2",
            "role": "librarian"
        }"#;

        let request: SignUpRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "alice@example.com");
        assert_eq!(request.role, "librarian");
    }

    #[test]
    fn borrow_request_missing_ids_default_to_zero() {
        let request: BorrowBookRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.book_id, 0);
        assert_eq!(request.user_id, 0);
    }

    #[test]
    fn donate_request_deserializes_donor() {
        let json = r#"{
            "title": "Dune",
            "author": "Frank Herbert",
            "number": "BK-0042",
            "genre": "Science Fiction",
            "donated_by_id": 7
        }"#;

        let request: DonateBookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.donated_by_id, 7);
        assert_eq!(request.number, "BK-0042");
    }
}
