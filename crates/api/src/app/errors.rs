use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use keystone_auth::AuthError;

/// Map an auth-core error to a consistent JSON error response.
///
/// Authentication failures stay deliberately flat: invalid credentials
/// and deactivated accounts are both 401, and token failures carry no
/// detail about which check failed.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::DuplicateCredential => {
            json_error(StatusCode::CONFLICT, "duplicate_credential", err.to_string())
        }
        AuthError::TenantNotFound => json_error(StatusCode::NOT_FOUND, "tenant_not_found", err.to_string()),
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        AuthError::AccountDeactivated => {
            json_error(StatusCode::UNAUTHORIZED, "account_deactivated", err.to_string())
        }
        AuthError::Unauthenticated | AuthError::MalformedClaims => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "unauthenticated")
        }
        AuthError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
        AuthError::Internal(msg) => {
            tracing::error!(error = %msg, "internal failure in auth core");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
