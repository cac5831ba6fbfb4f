//! Admin-only routes (behind the Role Gate).
//!
//! The platform's admin CRUD (users, groups, organizations) lives in the
//! surrounding service; this router exists so the admin policy has a
//! mount point and stays exercised end to end.

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use keystone_auth::Principal;

pub fn router() -> Router {
    Router::new().route("/status", get(status))
}

/// GET /api/admin/status — reachable only by admins.
pub async fn status(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "admin": principal.email,
    }))
}
