//! Permission groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{GroupId, PermissionId, TenantId};

/// A named collection of permission identifiers.
///
/// Groups are many-to-many with identities; the store owns the join.
/// A group's permission list is not deduplicated at rest — groups may
/// overlap, and aggregation dedups at token-issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub permissions: Vec<PermissionId>,
    pub tenant_id: Option<TenantId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>, permissions: Vec<PermissionId>) -> Self {
        let now = Utc::now();
        Self {
            id: GroupId::new(),
            name: name.into(),
            permissions,
            tenant_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
