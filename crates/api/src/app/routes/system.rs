use axum::{Json, http::StatusCode, response::IntoResponse};

use keystone_auth::Principal;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the principal attached by the Authorization Gate.
pub async fn whoami(
    axum::extract::Extension(principal): axum::extract::Extension<Principal>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "user_id": principal.user_id.to_string(),
        "email": principal.email,
        "tenant_id": principal.tenant_id.map(|t| t.to_string()),
        "permissions": principal.permissions.iter().copied().map(i64::from).collect::<Vec<_>>(),
        "is_admin": principal.is_admin,
        "is_staff": principal.is_staff,
    }))
}
