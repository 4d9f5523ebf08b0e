use async_trait::async_trait;
use stratum_core::{AppResult, OrgId, RoleId, UserId};
use stratum_domain::{ReportingLine, User};

/// Read-only port over provisioned user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id, `None` when the record does not exist.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>>;
}

/// Read-only port returning the stored grant keys of a role.
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    /// Lists grant keys exactly as authored. An unknown role has no grants.
    async fn list_grant_keys_for_role(&self, role_id: RoleId) -> AppResult<Vec<String>>;
}

/// Read-only port over raw hierarchy edges.
#[async_trait]
pub trait ReportingLineRepository: Send + Sync {
    /// Lists the `managerId` edge of every user in an organization.
    async fn list_reporting_lines(&self, org_id: OrgId) -> AppResult<Vec<ReportingLine>>;
}
