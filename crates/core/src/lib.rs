//! `keystone-core` — domain foundation for the auth platform.
//!
//! This crate contains **pure domain** types (identities, groups, tenant
//! scoping) plus the storage collaborator contract. No HTTP, no crypto,
//! no persistence here.

pub mod group;
pub mod id;
pub mod identity;
pub mod store;

pub use group::Group;
pub use id::{GroupId, PermissionId, TenantId, UserId};
pub use identity::{Identity, IdentityStatus};
pub use store::{IdentityStore, StoreError};
