//! Storage collaborator contract.
//!
//! The auth core does not implement persistence. It consumes this trait
//! and relies on the implementation for atomic reads/writes and for the
//! unique `(email, tenant_id)` constraint — the "check then insert"
//! sequence in registration is not transactional on its own, so the
//! store constraint is the authoritative duplicate guard.

use async_trait::async_trait;
use thiserror::Error;

use crate::group::Group;
use crate::id::{TenantId, UserId};
use crate::identity::Identity;

/// Failures surfaced by a store implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store itself failed (connectivity, corruption).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Identity persistence collaborator.
///
/// Lookups are always scoped: `tenant_id: None` addresses the null-tenant
/// scope, never "any tenant".
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up an identity by credential scope.
    async fn find_identity(
        &self,
        email: &str,
        tenant_id: Option<TenantId>,
    ) -> Result<Option<Identity>, StoreError>;

    /// Look up an identity by id (not tenant-scoped; used after the caller
    /// is already authenticated for that id).
    async fn find_identity_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError>;

    /// Whether a tenant exists.
    async fn tenant_exists(&self, tenant_id: TenantId) -> Result<bool, StoreError>;

    /// Persist a new identity.
    ///
    /// Must enforce uniqueness of `(email, tenant_id)` atomically and
    /// return [`StoreError::ConstraintViolation`] on duplicates.
    async fn create_identity(&self, identity: Identity) -> Result<Identity, StoreError>;

    /// Replace an identity's password digest.
    async fn update_password_digest(&self, id: UserId, digest: &str) -> Result<(), StoreError>;

    /// Current group memberships for an identity, in membership order.
    async fn load_groups(&self, id: UserId) -> Result<Vec<Group>, StoreError>;
}
