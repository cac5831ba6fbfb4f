use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use keystone_auth::{AuthConfig, Claims};
use keystone_core::UserId;
use keystone_infra::InMemoryIdentityStore;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    store: Arc<InMemoryIdentityStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the same router as prod, but bind to an ephemeral port
        // and keep a handle on the store for seeding.
        let store = Arc::new(InMemoryIdentityStore::new());
        let config = AuthConfig::new(JWT_SECRET, 600).unwrap();
        let app = keystone_api::app::build_app(config, store.clone()).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    async fn register(&self, client: &reqwest::Client, email: &str) -> serde_json::Value {
        let res = client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({
                "email": email,
                "password": "hunter2-plus",
                "name": "Test User",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        res.json().await.unwrap()
    }

    async fn login(&self, client: &reqwest::Client, email: &str, password: &str) -> String {
        let res = client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_login_whoami_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let registered = srv.register(&client, "alice@example.com").await;
    assert_eq!(registered["email"], "alice@example.com");
    assert_eq!(registered["status"], "pending");
    assert!(registered.get("password_digest").is_none());

    let token = srv.login(&client, "alice@example.com", "hunter2-plus").await;

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user_id"], registered["id"]);
    assert_eq!(body["email"], "alice@example.com");
    assert!(body["tenant_id"].is_null());
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.register(&client, "bob@example.com").await;

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({
            "email": "bob@example.com",
            "password": "hunter2-plus",
            "name": "Bob Again",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn same_email_under_a_tenant_is_a_distinct_scope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let tenant = keystone_core::TenantId::new();
    srv.store.add_tenant(tenant);

    srv.register(&client, "carol@example.com").await;

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({
            "email": "carol@example.com",
            "password": "hunter2-plus",
            "name": "Carol",
            "tenant_id": tenant.to_string(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_tenant_registration_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({
            "email": "dave@example.com",
            "password": "hunter2-plus",
            "name": "Dave",
            "tenant_id": keystone_core::TenantId::new().to_string(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_gate_rejects_non_admins() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let registered = srv.register(&client, "erin@example.com").await;
    let token = srv.login(&client, "erin@example.com", "hunter2-plus").await;

    let res = client
        .get(format!("{}/api/admin/status", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Promote and re-login: the fresh token carries the admin flag.
    let user_id: UserId = registered["id"].as_str().unwrap().parse().unwrap();
    srv.store.update_identity(user_id, |i| i.is_admin = true).unwrap();

    let token = srv.login(&client, "erin@example.com", "hunter2-plus").await;
    let res = client
        .get(format!("{}/api/admin/status", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn tampered_token_is_unauthorized() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.register(&client, "frank@example.com").await;
    let token = srv.login(&client, "frank@example.com", "hunter2-plus").await;

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    let mut payload = parts[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    parts[1] = String::from_utf8(payload).unwrap();
    let tampered = parts.join(".");

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&tampered)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Correctly signed, already expired.
    let now = Utc::now();
    let claims = Claims {
        sub: UserId::new(),
        email: "ghost@example.com".to_string(),
        tenant_id: None,
        permissions: vec![],
        is_admin: false,
        is_staff: false,
        iat: (now - ChronoDuration::minutes(20)).timestamp(),
        exp: (now - ChronoDuration::minutes(10)).timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivation_blocks_login_but_not_outstanding_tokens() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let registered = srv.register(&client, "grace@example.com").await;
    let token = srv.login(&client, "grace@example.com", "hunter2-plus").await;

    let user_id: UserId = registered["id"].as_str().unwrap().parse().unwrap();
    srv.store.update_identity(user_id, |i| i.is_active = false).unwrap();

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "grace@example.com", "password": "hunter2-plus" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Pins current behavior: no revocation, the gate still accepts the
    // already-issued token until it expires.
    let res = client
        .get(format!("{}/whoami", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn change_password_over_http() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.register(&client, "heidi@example.com").await;
    let token = srv.login(&client, "heidi@example.com", "hunter2-plus").await;

    let res = client
        .post(format!("{}/api/auth/change-password", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "old_password": "wrong-old", "new_password": "next-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/api/auth/change-password", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "old_password": "hunter2-plus", "new_password": "next-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Old credential rejected, new one accepted.
    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "heidi@example.com", "password": "hunter2-plus" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    srv.login(&client, "heidi@example.com", "next-password").await;
}

#[tokio::test]
async fn me_returns_a_fresh_snapshot() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let registered = srv.register(&client, "ivan@example.com").await;
    let token = srv.login(&client, "ivan@example.com", "hunter2-plus").await;

    let user_id: UserId = registered["id"].as_str().unwrap().parse().unwrap();
    srv.store.update_identity(user_id, |i| i.is_verified = true).unwrap();

    let res = client
        .get(format!("{}/api/auth/me", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    // The snapshot reflects store state, not the token's frozen claims.
    assert_eq!(body["status"], "active");
}
