//! Registration, login, and password-change orchestration.
//!
//! Each operation is independent — there is no cross-operation session
//! state. The only shared resources are the signing secret (immutable,
//! loaded at construction) and the store collaborator, which provides
//! its own concurrency control.

use std::sync::Arc;

use chrono::{Duration, Utc};

use keystone_core::{Identity, IdentityStore, StoreError, TenantId, UserId};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::permissions::aggregate_permissions;
use crate::principal::Principal;
use crate::token::{Claims, TokenCodec};

/// Registration request.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: String,
    /// `None` registers into the null-tenant scope.
    pub tenant_id: Option<TenantId>,
}

/// Login request. The tenant scope must match the one used at
/// registration; the null scope is its own scope.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub tenant_id: Option<TenantId>,
}

/// The auth core service.
///
/// Orchestrates hashing, aggregation, and the token codec over the
/// storage collaborator. Construct one per process (or per test, with a
/// distinct secret).
pub struct AuthService {
    store: Arc<dyn IdentityStore>,
    codec: TokenCodec,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(config: &AuthConfig, store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            codec: TokenCodec::new(config.jwt_secret()),
            token_ttl: config.token_ttl(),
        }
    }

    /// Register a new identity in the given tenant scope.
    ///
    /// New identities start active, unverified, non-admin, non-staff.
    /// The store's unique `(email, tenant_id)` constraint is the
    /// authoritative duplicate guard; a constraint violation on create
    /// surfaces as [`AuthError::DuplicateCredential`] just like the
    /// pre-check.
    pub async fn register(&self, input: RegisterInput) -> Result<Identity, AuthError> {
        if self
            .store
            .find_identity(&input.email, input.tenant_id)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateCredential);
        }

        if let Some(tenant_id) = input.tenant_id {
            if !self.store.tenant_exists(tenant_id).await? {
                return Err(AuthError::TenantNotFound);
            }
        }

        let digest = password::hash_password(&input.password)?;

        let now = Utc::now();
        let identity = Identity {
            id: UserId::new(),
            email: input.email,
            name: input.name,
            password_digest: digest,
            tenant_id: input.tenant_id,
            is_admin: false,
            is_staff: false,
            is_active: true,
            is_verified: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let created = match self.store.create_identity(identity).await {
            Ok(created) => created,
            Err(StoreError::ConstraintViolation(_)) => return Err(AuthError::DuplicateCredential),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %created.id, "identity registered");
        Ok(created.scrubbed())
    }

    /// Authenticate a credential and issue a token.
    ///
    /// The returned token freezes the identity's effective permission
    /// set (the deduplicated union of its groups) at this moment;
    /// re-login is the only way to refresh it.
    pub async fn login(&self, input: LoginInput) -> Result<(String, Identity), AuthError> {
        let identity = self
            .store
            .find_identity(&input.email, input.tenant_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !identity.can_authenticate() {
            tracing::debug!(user_id = %identity.id, "login refused for deactivated identity");
            return Err(AuthError::AccountDeactivated);
        }

        if !password::verify_password(&identity.password_digest, &input.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let groups = self.store.load_groups(identity.id).await?;
        let permissions = aggregate_permissions(&groups);

        let claims = Claims::for_identity(&identity, permissions, Utc::now(), self.token_ttl);
        let token = self.codec.issue(&claims)?;

        tracing::info!(user_id = %identity.id, "login succeeded");
        Ok((token, identity.scrubbed()))
    }

    /// Change a password for an already-authenticated identity.
    ///
    /// Outstanding tokens are *not* invalidated — they remain valid until
    /// their own expiry (stateless tokens, no revocation list).
    pub async fn change_password(
        &self,
        identity_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let identity = self
            .store
            .find_identity_by_id(identity_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&identity.password_digest, old_password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let digest = password::hash_password(new_password)?;
        match self.store.update_password_digest(identity_id, &digest).await {
            Ok(()) => {}
            Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %identity_id, "password changed");
        Ok(())
    }

    /// Verify a raw bearer token and produce the request principal.
    ///
    /// Pure CPU work — no storage access. Every token failure collapses
    /// into [`AuthError::Unauthenticated`]; the boundary never leaks
    /// which check failed.
    pub fn authorize(&self, raw_token: &str) -> Result<Principal, AuthError> {
        let claims = self.codec.verify(raw_token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::Unauthenticated
        })?;
        Ok(Principal::from(claims))
    }

    /// Fresh identity snapshot for an authenticated principal.
    pub async fn current_identity(&self, identity_id: UserId) -> Result<Identity, AuthError> {
        let identity = self
            .store
            .find_identity_by_id(identity_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        Ok(identity.scrubbed())
    }
}
