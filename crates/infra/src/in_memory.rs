//! In-memory identity store.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use keystone_core::{
    Group, GroupId, Identity, IdentityStore, StoreError, TenantId, UserId,
};

#[derive(Debug, Default)]
struct Inner {
    identities: HashMap<UserId, Identity>,
    tenants: HashSet<TenantId>,
    groups: HashMap<GroupId, Group>,
    /// Memberships in assignment order, per identity.
    memberships: HashMap<UserId, Vec<GroupId>>,
}

/// In-memory [`IdentityStore`].
///
/// Intended for tests/dev. Enforces the unique `(email, tenant_id)`
/// constraint the same way a relational store would.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<Inner>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant.
    pub fn add_tenant(&self, tenant_id: TenantId) {
        if let Ok(mut inner) = self.inner.write() {
            inner.tenants.insert(tenant_id);
        }
    }

    /// Seed a group, returning its id.
    pub fn add_group(&self, group: Group) -> GroupId {
        let id = group.id;
        if let Ok(mut inner) = self.inner.write() {
            inner.groups.insert(id, group);
        }
        id
    }

    /// Add an identity to a group (membership order is preserved).
    pub fn assign_group(&self, user_id: UserId, group_id: GroupId) {
        if let Ok(mut inner) = self.inner.write() {
            inner.memberships.entry(user_id).or_default().push(group_id);
        }
    }

    /// Mutate a stored identity in place (test/admin seam, e.g. flipping
    /// `is_admin` or deactivating an account).
    pub fn update_identity<F>(&self, id: UserId, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Identity),
    {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let identity = inner.identities.get_mut(&id).ok_or(StoreError::NotFound)?;
        mutate(identity);
        identity.updated_at = chrono::Utc::now();
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_identity(
        &self,
        email: &str,
        tenant_id: Option<TenantId>,
    ) -> Result<Option<Identity>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .identities
            .values()
            .find(|i| i.email == email && i.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_identity_by_id(&self, id: UserId) -> Result<Option<Identity>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.identities.get(&id).cloned())
    }

    async fn tenant_exists(&self, tenant_id: TenantId) -> Result<bool, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.tenants.contains(&tenant_id))
    }

    async fn create_identity(&self, identity: Identity) -> Result<Identity, StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        // Unique (email, tenant_id), checked under the write lock — this
        // is the constraint registration relies on to close its
        // check-then-insert race.
        if inner
            .identities
            .values()
            .any(|i| i.email == identity.email && i.tenant_id == identity.tenant_id)
        {
            return Err(StoreError::ConstraintViolation(format!(
                "identity ({}, {:?}) already exists",
                identity.email, identity.tenant_id
            )));
        }

        inner.identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update_password_digest(&self, id: UserId, digest: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let identity = inner.identities.get_mut(&id).ok_or(StoreError::NotFound)?;
        identity.password_digest = digest.to_string();
        identity.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn load_groups(&self, id: UserId) -> Result<Vec<Group>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        let Some(group_ids) = inner.memberships.get(&id) else {
            return Ok(Vec::new());
        };
        Ok(group_ids
            .iter()
            .filter_map(|gid| inner.groups.get(gid))
            .cloned()
            .collect())
    }
}
