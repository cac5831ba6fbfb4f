//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use keystone_auth::{AuthConfig, AuthService};
use keystone_core::IdentityStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AuthConfig, store: Arc<dyn IdentityStore>) -> Router {
    let auth = Arc::new(AuthService::new(&config, store));
    let auth_state = middleware::AuthState { auth: auth.clone() };

    // Admin routes: Authorization Gate, then Role Gate.
    let admin = routes::admin::router().layer(axum::middleware::from_fn(
        middleware::admin_middleware,
    ));

    // Protected routes: require a verified bearer token.
    let protected = routes::router()
        .nest("/api/admin", admin)
        .layer(Extension(auth.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(Extension(auth))
        .merge(protected)
}
