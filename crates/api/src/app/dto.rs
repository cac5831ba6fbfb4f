use serde::Deserialize;

use keystone_core::{Identity, TenantId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub tenant_id: Option<TenantId>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// -------------------------
// Response mapping
// -------------------------

/// Identity as exposed over the API. The password digest is scrubbed by
/// the service before it reaches this point; it never appears here.
pub fn identity_to_json(identity: &Identity) -> serde_json::Value {
    serde_json::json!({
        "id": identity.id.to_string(),
        "email": identity.email,
        "name": identity.name,
        "tenant_id": identity.tenant_id.map(|t| t.to_string()),
        "is_admin": identity.is_admin,
        "is_staff": identity.is_staff,
        "is_active": identity.is_active,
        "is_verified": identity.is_verified,
        "is_deleted": identity.is_deleted,
        "status": identity.status().to_string(),
        "created_at": identity.created_at.to_rfc3339(),
        "updated_at": identity.updated_at.to_rfc3339(),
    })
}
