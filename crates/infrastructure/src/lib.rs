//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod cached_role_permission_repository;
mod in_memory_access_directory;
mod postgres_audit_repository;
mod postgres_reporting_line_repository;
mod postgres_role_permission_repository;
mod postgres_user_repository;

pub use cached_role_permission_repository::CachedRolePermissionRepository;
pub use in_memory_access_directory::{InMemoryAccessDirectory, InMemoryAuditLog};
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_reporting_line_repository::PostgresReportingLineRepository;
pub use postgres_role_permission_repository::PostgresRolePermissionRepository;
pub use postgres_user_repository::PostgresUserRepository;
