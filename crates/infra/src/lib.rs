//! `keystone-infra` — storage collaborator implementations.
//!
//! Real deployments plug a relational store in behind
//! `keystone_core::IdentityStore`; this crate ships the in-memory
//! implementation used for tests and local development.

pub mod in_memory;

pub use in_memory::InMemoryIdentityStore;
