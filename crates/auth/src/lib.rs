//! `scolaris-auth` — pure authorization boundary for the session core.
//!
//! This crate is intentionally decoupled from HTTP and provider plumbing.

pub mod evaluator;
pub mod permissions;
pub mod policy;
pub mod profile;
pub mod roles;

pub use evaluator::{has_permission, has_role, may_perform};
pub use permissions::PermissionId;
pub use policy::{OperatorAction, authorized_roles, implied_permissions};
pub use profile::{EnrichedUser, LoginStatus};
pub use roles::RoleId;
