//! Authenticated request identity.

use serde::{Deserialize, Serialize};

use keystone_core::{PermissionId, TenantId, UserId};

use crate::token::Claims;

/// The identity attached to a request after token verification.
///
/// This is the *only* channel by which downstream handlers learn who is
/// calling; identity must never be re-derived from request body fields.
/// It is a frozen snapshot of the claims — including the tenant scope
/// the credential was verified under at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    pub tenant_id: Option<TenantId>,
    pub permissions: Vec<PermissionId>,
    pub is_admin: bool,
    pub is_staff: bool,
}

impl Principal {
    pub fn has_permission(&self, permission: PermissionId) -> bool {
        self.permissions.contains(&permission)
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            tenant_id: claims.tenant_id,
            permissions: claims.permissions,
            is_admin: claims.is_admin,
            is_staff: claims.is_staff,
        }
    }
}
