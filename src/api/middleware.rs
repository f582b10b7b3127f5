//! API Middleware
//!
//! Bearer-token authentication, the role allow-list gate, and request
//! logging.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::errors::ErrorKind;

use crate::domain::Role;
use crate::error::AppError;
use crate::AppState;

/// Authenticated identity stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    /// Role allow-list gate.
    ///
    /// Protected operations call this before touching any state; a
    /// rejection is terminal and nothing executes after it.
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Validate the `Authorization: Bearer <token>` header and stash the
/// authenticated identity in request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Authorization header missing".to_string()))?;

    let mut parts = header_value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::Unauthenticated(
            "Authorization header format must be Bearer <token>".to_string(),
        ));
    }

    let claims = state
        .tokens
        .validate(token)
        .map_err(|e| AppError::Unauthenticated(describe_token_error(&e)))?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

fn describe_token_error(err: &jsonwebtoken::errors::Error) -> String {
    match err.kind() {
        ErrorKind::ExpiredSignature => "Token expired".to_string(),
        ErrorKind::InvalidSignature => "Invalid token signature".to_string(),
        ErrorKind::ImmatureSignature => "Token not valid yet".to_string(),
        _ => "Invalid token".to_string(),
    }
}

/// Request logging middleware
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = uuid::Uuid::new_v4();

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Incoming request"
    );

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}
