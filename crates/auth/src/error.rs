//! Auth error model.

use thiserror::Error;

use keystone_core::StoreError;

/// Errors returned across the auth service boundary.
///
/// Credential failures are deliberately lumpy: "no such user" and "wrong
/// password" both surface as [`AuthError::InvalidCredentials`] so a caller
/// can never probe which factor failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An identity with this email already exists in the same tenant scope.
    #[error("an account with this email already exists in this tenant")]
    DuplicateCredential,

    /// The tenant named at registration does not exist.
    #[error("tenant not found")]
    TenantNotFound,

    /// Unknown credential or password mismatch (indistinguishable).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The identity exists but is soft-deleted or inactive.
    #[error("account is deactivated")]
    AccountDeactivated,

    /// Missing, invalid, or expired token at the request boundary.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Authenticated but lacking the required role.
    #[error("forbidden")]
    Forbidden,

    /// Token claims failed structural validation.
    #[error("malformed token claims")]
    MalformedClaims,

    /// Collaborator fault (storage unavailable, signing failure).
    /// The only class eligible for transport-level retry.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        // Variants with auth-level meaning (NotFound on lookup,
        // ConstraintViolation on create) are matched at the call site;
        // anything reaching this conversion is a collaborator fault.
        AuthError::Internal(err.to_string())
    }
}

/// Token verification failures, in check order: signature, expiry,
/// claim structure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature did not verify against the configured secret
    /// (tampering or wrong secret).
    #[error("invalid token signature")]
    InvalidSignature,

    /// `exp` is in the past.
    #[error("token has expired")]
    Expired,

    /// Required claim missing or mistyped.
    #[error("malformed token claims")]
    MalformedClaims,
}
