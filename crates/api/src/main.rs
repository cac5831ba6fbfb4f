use std::sync::Arc;

use keystone_auth::AuthConfig;
use keystone_infra::InMemoryIdentityStore;

#[tokio::main]
async fn main() {
    keystone_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let token_ttl_secs: i64 = std::env::var("TOKEN_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600);

    let config = AuthConfig::new(jwt_secret, token_ttl_secs).expect("invalid auth configuration");

    // Dev/test store; production wires a relational IdentityStore here.
    let store = Arc::new(InMemoryIdentityStore::new());

    let app = keystone_api::app::build_app(config, store).await;

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
