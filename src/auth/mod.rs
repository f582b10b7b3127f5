//! Credential service
//!
//! Password hashing and signed session tokens. The rest of the system
//! consumes only the validated identity and role; raw secrets never
//! leave this module's callers.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenIssuer};
