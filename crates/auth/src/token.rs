//! Token issuance and verification (HS256).
//!
//! Tokens are signed, self-contained, and immutable once issued. There is
//! no server-side session state and no revocation list: a token stays
//! valid until its own expiry (statelessness over revocability —
//! re-login is the only way to refresh the permissions baked in).

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use keystone_core::{Identity, PermissionId, TenantId, UserId};

use crate::error::{AuthError, TokenError};

/// Strongly-typed token claims.
///
/// Decoding validates field-by-field via serde: any missing or mistyped
/// field is [`TokenError::MalformedClaims`] — no untyped claim map is
/// ever trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user id.
    pub sub: UserId,
    pub email: String,
    /// Tenant scope the credential was verified under. `None` is the
    /// null-tenant scope, distinct from every concrete tenant.
    pub tenant_id: Option<TenantId>,
    /// Effective permission set frozen at issuance.
    pub permissions: Vec<PermissionId>,
    pub is_admin: bool,
    pub is_staff: bool,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expires-at, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Build claims for an identity at `now`, expiring after `ttl`.
    pub fn for_identity(
        identity: &Identity,
        permissions: Vec<PermissionId>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: identity.id,
            email: identity.email.clone(),
            tenant_id: identity.tenant_id,
            permissions,
            is_admin: identity.is_admin,
            is_staff: identity.is_staff,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Symmetric-MAC token codec keyed by a process-wide secret.
///
/// The secret comes from configuration at construction time and never
/// from request data.
pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign claims into a compact token string.
    ///
    /// Deterministic for identical claims and secret.
    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&self.header, claims, &self.encoding)
            .map_err(|e| AuthError::internal(format!("token signing failed: {e}")))
    }

    /// Verify a token against the configured secret at the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token at an explicit `now` (deterministic for tests).
    ///
    /// Checks run in order: signature, expiry, claim structure. Any
    /// failure is terminal — there is no partial-trust mode.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        // Expiry is checked by hand below so the signature/expiry/structure
        // ordering is explicit rather than library-defined.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = jsonwebtoken::decode::<serde_json::Value>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::MalformedClaims,
            })?;

        let exp = data
            .claims
            .get("exp")
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::MalformedClaims)?;
        if now.timestamp() >= exp {
            return Err(TokenError::Expired);
        }

        serde_json::from_value(data.claims).map_err(|_| TokenError::MalformedClaims)
    }
}
