mod audit;
mod directory;
mod session;

pub use audit::{AuditEvent, AuditRepository};
pub use directory::{ReportingLineRepository, RolePermissionRepository, UserRepository};
pub use session::{ResolvedSession, SessionResolver};
