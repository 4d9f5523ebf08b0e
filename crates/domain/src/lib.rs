//! Domain entities and invariants of the permission-resolution engine.

#![forbid(unsafe_code)]

mod grant;
mod hierarchy;
mod navigation;
mod permission_map;
mod role;
mod security;
mod user;

pub use grant::{PermissionGrant, PermissionKey, WILDCARD_GRANT, validate_grant_keys};
pub use hierarchy::{ReportingLine, SubordinateTraversal, collect_subordinates};
pub use navigation::NavItem;
pub use permission_map::{PermissionMap, PermissionMapBuilder};
pub use role::Role;
pub use security::AccessOutcome;
pub use user::{EmailAddress, User};
