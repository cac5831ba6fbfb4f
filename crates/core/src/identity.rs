//! User identity record.
//!
//! The core treats an [`Identity`] as an immutable snapshot per request;
//! the persistence layer owns mutation and enforces the unique
//! `(email, tenant_id)` credential constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{TenantId, UserId};

/// A user identity within a tenant scope.
///
/// # Invariants
/// - An identity belongs to exactly one tenant scope, including the null
///   scope (`tenant_id: None`). The scope is fixed at registration.
/// - `email` is unique within its tenant scope (store-enforced).
/// - Deletion is logical (`is_deleted`); identities are never physically
///   removed by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// PHC-formatted password digest. Scrub with [`Identity::scrubbed`]
    /// before returning an identity to any caller.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password_digest: String,
    pub tenant_id: Option<TenantId>,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Whether this identity may authenticate at all.
    pub fn can_authenticate(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// Lifecycle status derived from the flag set.
    pub fn status(&self) -> IdentityStatus {
        if !self.is_verified {
            return IdentityStatus::Pending;
        }
        if self.is_deleted || !self.is_active {
            return IdentityStatus::Deactivated;
        }
        IdentityStatus::Active
    }

    /// Copy of this identity with the password digest removed.
    ///
    /// Every identity handed back across the service boundary goes through
    /// this; the digest never leaves the auth core.
    pub fn scrubbed(&self) -> Self {
        Self {
            password_digest: String::new(),
            ..self.clone()
        }
    }
}

/// Derived account lifecycle status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStatus {
    /// Registered but email not yet verified.
    Pending,
    /// Verified but soft-deleted or switched inactive.
    Deactivated,
    /// Verified, active, not deleted.
    Active,
}

impl core::fmt::Display for IdentityStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IdentityStatus::Pending => write!(f, "pending"),
            IdentityStatus::Deactivated => write!(f, "deactivated"),
            IdentityStatus::Active => write!(f, "active"),
        }
    }
}
