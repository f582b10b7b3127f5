//! Session tokens
//!
//! HS256 JWTs carrying the user's identity, email, and role. Tokens
//! expire 24 hours after issue and are not valid before issue time.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

/// Fixed token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Not-before (unix seconds).
    pub nbf: i64,
}

/// Issues and validates signed session tokens.
///
/// Constructed once at startup from the configured secret and passed
/// around as part of the application state.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.validate_nbf = true;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for an authenticated user.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + TOKEN_TTL_HOURS * 3600,
            nbf: now,
        };

        tracing::debug!(user_id = user.id, "Issuing session token");

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn test_user(role: Role) -> User {
        User {
            id: 42,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            penalty: Decimal::ZERO,
            blocked: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn issue_and_validate_round_trip() {
        let issuer = TokenIssuer::new("test-secret-key-12345");
        let token = issuer.issue(&test_user(Role::Student)).unwrap();
        assert!(!token.is_empty());

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let issuer = TokenIssuer::new("test-secret-key-12345");
        assert!(issuer.validate("not.a.token").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer_a = TokenIssuer::new("secret-a");
        let issuer_b = TokenIssuer::new("secret-b");

        let token = issuer_a.issue(&test_user(Role::Librarian)).unwrap();
        assert!(issuer_b.validate(&token).is_err());
    }

    #[test]
    fn claims_carry_the_role() {
        let issuer = TokenIssuer::new("test-secret-key-12345");
        let token = issuer.issue(&test_user(Role::Librarian)).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.role, Role::Librarian);
    }
}
