//! `keystone-auth` — the authentication/authorization core.
//!
//! This crate owns the pieces with real invariants: password hashing,
//! token issuance/verification, permission aggregation, and the
//! register/login/change-password orchestration. It is intentionally
//! decoupled from HTTP and storage; persistence is consumed through
//! `keystone_core::IdentityStore`.

pub mod authorize;
pub mod config;
pub mod error;
pub mod password;
pub mod permissions;
pub mod principal;
pub mod service;
pub mod token;

pub use authorize::require_admin;
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, TokenError};
pub use password::{hash_password, verify_password};
pub use permissions::aggregate_permissions;
pub use principal::Principal;
pub use service::{AuthService, LoginInput, RegisterInput};
pub use token::{Claims, TokenCodec};
