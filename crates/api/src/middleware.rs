//! Authorization Gate and Role Gate.
//!
//! The auth middleware is the only place a request identity is
//! established: it verifies the bearer token and attaches the decoded
//! [`Principal`] to the request extensions. Downstream handlers read the
//! extension and never re-derive identity from request bodies.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use keystone_auth::{AuthService, Principal, require_admin};

#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// Authorization Gate: verify the bearer token and attach the principal.
///
/// Missing/malformed header or any token failure halts the pipeline with
/// 401 — no downstream handler runs, and the reason is never disclosed.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let principal = state
        .auth
        .authorize(token)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Role Gate: require the admin flag on the already-attached principal.
///
/// Runs after [`auth_middleware`]; a non-admin principal halts with 403.
pub async fn admin_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    require_admin(principal).map_err(|_e| StatusCode::FORBIDDEN)?;

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
