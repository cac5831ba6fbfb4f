//! HTTP API: request boundary for the auth core.
//!
//! The interesting pieces live in `middleware` (the authorization and
//! role gates); everything else is routing and DTO shaping over
//! `keystone_auth::AuthService`.

pub mod app;
pub mod middleware;
