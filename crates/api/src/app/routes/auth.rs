//! Registration, login, and account self-service.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use keystone_auth::{AuthService, LoginInput, Principal, RegisterInput};

use crate::app::dto::{self, ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::app::errors;

const MIN_PASSWORD_LEN: usize = 6;

/// POST /api/auth/register
pub async fn register(
    Extension(auth): Extension<Arc<AuthService>>,
    Json(body): Json<RegisterRequest>,
) -> axum::response::Response {
    if let Err(resp) = validate_credential_shape(&body.email, &body.password) {
        return resp;
    }
    if body.name.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "name is required");
    }

    let input = RegisterInput {
        email: body.email.trim().to_string(),
        password: body.password,
        name: body.name.trim().to_string(),
        tenant_id: body.tenant_id,
    };

    match auth.register(input).await {
        Ok(identity) => (StatusCode::CREATED, Json(dto::identity_to_json(&identity))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /api/auth/login
pub async fn login(
    Extension(auth): Extension<Arc<AuthService>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let input = LoginInput {
        email: body.email.trim().to_string(),
        password: body.password,
        tenant_id: body.tenant_id,
    };

    match auth.login(input).await {
        Ok((token, identity)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "token": token,
                "user": dto::identity_to_json(&identity),
            })),
        )
            .into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /api/auth/change-password (protected)
pub async fn change_password(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<ChangePasswordRequest>,
) -> axum::response::Response {
    if body.new_password.len() < MIN_PASSWORD_LEN {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    match auth
        .change_password(principal.user_id, &body.old_password, &body.new_password)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "password changed" })),
        )
            .into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// GET /api/auth/me (protected) — fresh identity snapshot.
pub async fn me(
    Extension(auth): Extension<Arc<AuthService>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match auth.current_identity(principal.user_id).await {
        Ok(identity) => (StatusCode::OK, Json(dto::identity_to_json(&identity))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

fn validate_credential_shape(email: &str, password: &str) -> Result<(), axum::response::Response> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "invalid email",
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}
