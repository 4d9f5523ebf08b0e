//! Application services and ports of the permission-resolution engine.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_config;
mod navigation;
mod permission_guard;
mod subordinate_resolver;
mod user_context;

#[cfg(test)]
mod fakes;

pub use access_ports::{
    AuditEvent, AuditRepository, ReportingLineRepository, ResolvedSession,
    RolePermissionRepository, SessionResolver, UserRepository,
};
pub use authorization_config::{AuthorizationConfig, DEFAULT_LOOKUP_TIMEOUT};
pub use navigation::filter_navigation;
pub use permission_guard::{AccessDenial, PermissionGuard};
pub use subordinate_resolver::SubordinateResolver;
pub use user_context::{UserContext, UserContextBuilder};
