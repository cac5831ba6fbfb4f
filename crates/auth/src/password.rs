//! Password hashing and verification (Argon2id).
//!
//! Digests are PHC-formatted strings that embed their own salt and cost
//! parameters, so verification needs no side channel.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AuthError;

/// Hash a plaintext password with a fresh random salt.
///
/// Fails only on catastrophic library/entropy failure; that is an
/// [`AuthError::Internal`], never a user-facing condition.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored digest.
///
/// A mismatch is a normal `Ok(false)` outcome, not an error. An
/// unparseable stored digest indicates data corruption and surfaces as
/// [`AuthError::Internal`].
pub fn verify_password(digest: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| AuthError::internal(format!("invalid password digest: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let digest = hash_password("correct-horse-battery-staple").unwrap();

        assert!(digest.starts_with("$argon2"));
        assert!(verify_password(&digest, "correct-horse-battery-staple").unwrap());
        assert!(!verify_password(&digest, "wrong-password").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();

        // Fresh salt per hash.
        assert_ne!(a, b);
        assert!(verify_password(&a, "same-password").unwrap());
        assert!(verify_password(&b, "same-password").unwrap());
    }

    #[test]
    fn corrupt_digest_is_internal_error() {
        let err = verify_password("not-a-phc-string", "anything").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
