//! Password hashing
//!
//! bcrypt with the default cost. Hashes are opaque credentials;
//! comparison is constant-time inside the crate.

use bcrypt::{hash as bcrypt_hash, verify as bcrypt_verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password into an opaque credential.
pub fn hash(plain: &str) -> Result<String, BcryptError> {
    bcrypt_hash(plain, DEFAULT_COST)
}

/// Verify a plaintext password against a stored credential.
pub fn verify(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt_verify(plain, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify("hunter2", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hashed = hash("hunter2").unwrap();
        assert!(!verify("hunter3", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // bcrypt salts every hash
        let a = hash("hunter2").unwrap();
        let b = hash("hunter2").unwrap();
        assert_ne!(a, b);
    }
}
